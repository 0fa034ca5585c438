use super::errors::{OtpSendError, OtpVerifyError};
use super::schemas::{SendOtpData, SendOtpRequest, VerifyOtpRequest};
use super::utils::{
    dispatch_password_reset_otp, validate_new_password, validate_otp_format,
    verify_otp_and_reset_password,
};
use crate::configuration::OtpSetting;
use crate::domain::EmailObject;
use crate::email_client::GenericEmailService;
use crate::schemas::GenericResponse;
use crate::stores::PasswordResetStore;
use actix_web::{web, Result};

#[utoipa::path(
    post,
    path = "/otp/send",
    tag = "Password Reset API",
    request_body(content = SendOtpRequest, description = "Request Body"),
    responses(
        (status=200, description= "OTP dispatched (identical body whether or not an account exists)", body= GenericResponse<SendOtpData>),
    )
)]
#[tracing::instrument(
    err,
    name = "Send Password Reset OTP",
    skip(body, store, email_service, otp_settings),
    fields(email = tracing::field::Empty)
)]
pub async fn send_otp(
    body: web::Json<SendOtpRequest>,
    store: web::Data<dyn PasswordResetStore>,
    email_service: web::Data<dyn GenericEmailService>,
    otp_settings: web::Data<OtpSetting>,
) -> Result<web::Json<GenericResponse<SendOtpData>>, OtpSendError> {
    let email = EmailObject::parse(body.0.email).map_err(OtpSendError::ValidationError)?;
    tracing::Span::current().record("email", tracing::field::display(&email));

    dispatch_password_reset_otp(store.get_ref(), email_service.get_ref(), &otp_settings, &email)
        .await?;

    // Identical body whether or not the account exists: no signal for
    // account enumeration.
    Ok(web::Json(GenericResponse::success(
        "If an account exists for this email, an OTP has been sent",
        Some(SendOtpData {
            expiry_minutes: otp_settings.expiry_minutes,
        }),
    )))
}

#[utoipa::path(
    post,
    path = "/otp/verify",
    tag = "Password Reset API",
    request_body(content = VerifyOtpRequest, description = "Request Body"),
    responses(
        (status=200, description= "Password reset successfully"),
        (status=400, description= "Validation failure or invalid/expired OTP"),
        (status=404, description= "User account not found"),
    )
)]
#[tracing::instrument(
    err,
    name = "Verify Password Reset OTP",
    skip(body, store),
    fields(email = tracing::field::Empty)
)]
pub async fn verify_otp(
    body: web::Json<VerifyOtpRequest>,
    store: web::Data<dyn PasswordResetStore>,
) -> Result<web::Json<GenericResponse<()>>, OtpVerifyError> {
    let request = body.0;
    let email = EmailObject::parse(request.email).map_err(OtpVerifyError::ValidationError)?;
    tracing::Span::current().record("email", tracing::field::display(&email));
    validate_otp_format(&request.otp)?;
    validate_new_password(&request.new_password)?;

    verify_otp_and_reset_password(store.get_ref(), &email, request.otp, request.new_password)
        .await?;

    Ok(web::Json(GenericResponse::success(
        "Password has been reset successfully",
        Some(()),
    )))
}
