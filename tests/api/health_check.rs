use std::sync::Arc;

use actix_web::test;

use crate::helpers::{spawn_app, CapturingEmailClient, InMemoryResetStore};

#[actix_web::test]
async fn health_check_works() {
    let store = Arc::new(InMemoryResetStore::new());
    let app = spawn_app(store, Arc::new(CapturingEmailClient::default())).await;

    let request = test::TestRequest::get()
        .uri("/utils/health_check")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert!(response.status().is_success());
    let body = test::read_body(response).await;
    assert_eq!(body.as_ref(), b"Running Server");
}
