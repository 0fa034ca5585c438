use crate::schemas::GenericResponse;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(thiserror::Error)]
pub enum OtpSendError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to dispatch the OTP email")]
    DispatchError(#[source] anyhow::Error),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for OtpSendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for OtpSendError {
    fn status_code(&self) -> StatusCode {
        match self {
            OtpSendError::ValidationError(_) => StatusCode::BAD_REQUEST,
            OtpSendError::DispatchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OtpSendError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            OtpSendError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            OtpSendError::ValidationError(message) => message.to_string(),
            OtpSendError::DispatchError(_) => {
                "Failed to send the OTP email. Please try again.".to_string()
            }
            OtpSendError::DatabaseError(message, _err) => message.to_string(),
            OtpSendError::UnexpectedError(_) => "Internal Server Error".to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}

#[derive(thiserror::Error)]
pub enum OtpVerifyError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Invalid or expired OTP")]
    InvalidOtp,
    #[error("OTP has expired. Please request a new one.")]
    OtpExpired,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DatabaseError(String, anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for OtpVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for OtpVerifyError {
    fn status_code(&self) -> StatusCode {
        match self {
            OtpVerifyError::ValidationError(_) => StatusCode::BAD_REQUEST,
            OtpVerifyError::InvalidOtp => StatusCode::BAD_REQUEST,
            OtpVerifyError::OtpExpired => StatusCode::BAD_REQUEST,
            OtpVerifyError::NotFound(_) => StatusCode::NOT_FOUND,
            OtpVerifyError::DatabaseError(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            OtpVerifyError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let status_code_str = status_code.as_str();
        let inner_error_msg = match self {
            OtpVerifyError::ValidationError(message) => message.to_string(),
            OtpVerifyError::InvalidOtp => self.to_string(),
            OtpVerifyError::OtpExpired => self.to_string(),
            OtpVerifyError::NotFound(message) => message.to_string(),
            OtpVerifyError::DatabaseError(message, _err) => message.to_string(),
            OtpVerifyError::UnexpectedError(_) => "Internal Server Error".to_string(),
        };

        HttpResponse::build(status_code).json(GenericResponse::error(
            &inner_error_msg,
            status_code_str,
            Some(()),
        ))
    }
}
