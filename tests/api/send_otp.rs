use std::sync::Arc;

use actix_web::test;
use serde_json::json;

use crate::helpers::{spawn_app, CapturingEmailClient, FailingEmailClient, InMemoryResetStore};

#[actix_web::test]
async fn send_otp_stores_a_record_and_dispatches_the_code() {
    let store = Arc::new(InMemoryResetStore::new());
    let email_client = Arc::new(CapturingEmailClient::default());
    store.seed_user("amit@campus.edu");
    let app = spawn_app(store.clone(), email_client.clone()).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "amit@campus.edu" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(
        body["customer_message"],
        "If an account exists for this email, an OTP has been sent"
    );
    assert_eq!(body["data"]["expiry_minutes"], 10);

    assert_eq!(email_client.sent_count(), 1);
    assert_eq!(store.otp_count_for("amit@campus.edu"), 1);
    let code = email_client.last_code().expect("email must carry a code");
    assert_eq!(code.len(), 6);
}

#[actix_web::test]
async fn send_otp_does_not_reveal_whether_an_account_exists() {
    let store = Arc::new(InMemoryResetStore::new());
    let email_client = Arc::new(CapturingEmailClient::default());
    store.seed_user("known@campus.edu");
    let app = spawn_app(store.clone(), email_client.clone()).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "known@campus.edu" }))
        .to_request();
    let known_response = test::call_service(&app, request).await;
    let known_status = known_response.status();
    let known_body: serde_json::Value = test::read_body_json(known_response).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "unknown@campus.edu" }))
        .to_request();
    let unknown_response = test::call_service(&app, request).await;
    let unknown_status = unknown_response.status();
    let unknown_body: serde_json::Value = test::read_body_json(unknown_response).await;

    assert_eq!(known_status, unknown_status);
    assert_eq!(known_body, unknown_body);

    // The unknown address gets no record and no email.
    assert_eq!(store.otp_count_for("unknown@campus.edu"), 0);
    assert_eq!(email_client.sent_count(), 1);
}

#[actix_web::test]
async fn send_otp_rejects_a_malformed_email() {
    let store = Arc::new(InMemoryResetStore::new());
    let app = spawn_app(store, Arc::new(CapturingEmailClient::default())).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], false);
}

#[actix_web::test]
async fn send_otp_normalizes_the_email_before_lookup() {
    let store = Arc::new(InMemoryResetStore::new());
    let email_client = Arc::new(CapturingEmailClient::default());
    store.seed_user("amit@campus.edu");
    let app = spawn_app(store.clone(), email_client.clone()).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "  AMIT@Campus.EDU  " }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(store.otp_count_for("amit@campus.edu"), 1);
    let sent = email_client.sent.lock().unwrap();
    assert_eq!(sent[0].to, "amit@campus.edu");
}

#[actix_web::test]
async fn a_new_request_replaces_the_previous_code() {
    let store = Arc::new(InMemoryResetStore::new());
    let email_client = Arc::new(CapturingEmailClient::default());
    store.seed_user("amit@campus.edu");
    let app = spawn_app(store.clone(), email_client.clone()).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "amit@campus.edu" }))
        .to_request();
    test::call_service(&app, request).await;
    let first_code = email_client.last_code().unwrap();

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "amit@campus.edu" }))
        .to_request();
    test::call_service(&app, request).await;
    let second_code = email_client.last_code().unwrap();

    // Only one active record at any time.
    assert_eq!(store.otp_count_for("amit@campus.edu"), 1);

    // The superseded code is dead even if it happens to differ by value only.
    let request = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({
            "email": "amit@campus.edu",
            "otp": first_code,
            "newPassword": "brand-new-password"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    if first_code != second_code {
        assert_eq!(response.status().as_u16(), 400);
    }

    let request = test::TestRequest::post()
        .uri("/otp/verify")
        .set_json(json!({
            "email": "amit@campus.edu",
            "otp": second_code,
            "newPassword": "brand-new-password"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn dispatch_failure_removes_the_stored_record() {
    let store = Arc::new(InMemoryResetStore::new());
    store.seed_user("amit@campus.edu");
    let app = spawn_app(store.clone(), Arc::new(FailingEmailClient)).await;

    let request = test::TestRequest::post()
        .uri("/otp/send")
        .set_json(json!({ "email": "amit@campus.edu" }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(
        body["customer_message"],
        "Failed to send the OTP email. Please try again."
    );
    // No orphaned secret survives a failed dispatch.
    assert_eq!(store.otp_count_for("amit@campus.edu"), 0);
}
