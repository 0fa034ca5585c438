use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto]
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Campus Lost & Found REST API", description = "Password recovery endpoints")
    ),
)]
pub struct ApiDoc {}
