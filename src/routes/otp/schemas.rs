use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub otp: SecretString,
    #[schema(value_type = String)]
    pub new_password: SecretString,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SendOtpData {
    pub expiry_minutes: i64,
}
