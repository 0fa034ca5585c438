use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{OtpRecordModel, UserAccountModel};

/// Persistence seam for the password-reset flows: the user-credential table
/// and the OTP record table. `commit_password_reset` is the single atomic
/// unit that updates the stored credential and consumes the OTP record;
/// both writes commit together or neither does.
#[async_trait]
pub trait PasswordResetStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str)
        -> Result<Option<UserAccountModel>, anyhow::Error>;

    async fn delete_otps_for_email(&self, email: &str) -> Result<u64, anyhow::Error>;

    async fn insert_otp(&self, record: &OtpRecordModel) -> Result<(), anyhow::Error>;

    async fn latest_otp_for_email(
        &self,
        email: &str,
    ) -> Result<Option<OtpRecordModel>, anyhow::Error>;

    async fn delete_otp_by_id(&self, id: Uuid) -> Result<(), anyhow::Error>;

    async fn commit_password_reset(
        &self,
        user_id: Uuid,
        password_hash: SecretString,
        otp_id: Uuid,
    ) -> Result<(), anyhow::Error>;
}

pub struct PgResetStore {
    pool: PgPool,
}

impl PgResetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetStore for PgResetStore {
    #[tracing::instrument(name = "Fetch user account by email", skip(self))]
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccountModel>, anyhow::Error> {
        let row = sqlx::query_as::<_, UserAccountModel>(
            "SELECT id, email, display_name FROM user_account WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user account by email")?;
        Ok(row)
    }

    #[tracing::instrument(name = "Delete OTP records for email", skip(self))]
    async fn delete_otps_for_email(&self, email: &str) -> Result<u64, anyhow::Error> {
        let result = sqlx::query("DELETE FROM password_reset_otp WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .context("Failed to delete OTP records for email")?;
        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Insert OTP record", skip(self, record), fields(email = %record.email))]
    async fn insert_otp(&self, record: &OtpRecordModel) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_otp (id, email, secret_hash, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.email)
        .bind(&record.secret_hash)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert OTP record")?;
        Ok(())
    }

    #[tracing::instrument(name = "Fetch latest OTP record for email", skip(self))]
    async fn latest_otp_for_email(
        &self,
        email: &str,
    ) -> Result<Option<OtpRecordModel>, anyhow::Error> {
        let row = sqlx::query_as::<_, OtpRecordModel>(
            r#"
            SELECT id, email, secret_hash, expires_at, created_at FROM password_reset_otp
            WHERE email = $1 ORDER BY created_at DESC LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch the latest OTP record for email")?;
        Ok(row)
    }

    #[tracing::instrument(name = "Delete OTP record by id", skip(self))]
    async fn delete_otp_by_id(&self, id: Uuid) -> Result<(), anyhow::Error> {
        sqlx::query("DELETE FROM password_reset_otp WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete OTP record by id")?;
        Ok(())
    }

    #[tracing::instrument(name = "Commit password reset", skip(self, password_hash))]
    async fn commit_password_reset(
        &self,
        user_id: Uuid,
        password_hash: SecretString,
        otp_id: Uuid,
    ) -> Result<(), anyhow::Error> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .context("Failed to acquire a Postgres connection from the pool")?;

        sqlx::query("UPDATE user_account SET password_hash = $1 WHERE id = $2")
            .bind(password_hash.expose_secret())
            .bind(user_id)
            .execute(&mut *transaction)
            .await
            .context("Failed to update the stored credential hash")?;

        sqlx::query("DELETE FROM password_reset_otp WHERE id = $1")
            .bind(otp_id)
            .execute(&mut *transaction)
            .await
            .context("Failed to delete the consumed OTP record")?;

        transaction
            .commit()
            .await
            .context("Failed to commit SQL transaction for the password reset.")?;
        Ok(())
    }
}
