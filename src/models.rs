use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserAccountModel {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// One password-reset OTP row. `secret_hash` is a salted Argon2 hash of the
/// 6-digit code; the plaintext code is never persisted.
#[derive(Debug, Clone, FromRow)]
pub struct OtpRecordModel {
    pub id: Uuid,
    pub email: String,
    pub secret_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
