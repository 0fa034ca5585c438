use super::errors::{OtpSendError, OtpVerifyError};
use crate::configuration::OtpSetting;
use crate::constants::{OTP_EMAIL_SUBJECT, OTP_PATTERN};
use crate::domain::EmailObject;
use crate::email_client::GenericEmailService;
use crate::models::OtpRecordModel;
use crate::stores::PasswordResetStore;
use crate::utils::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use chrono::{Duration, Utc};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

/// Uniform 6-digit code; the first digit is never zero.
pub fn generate_otp_code() -> SecretString {
    let code = rand::rng().random_range(100_000..=999_999);
    SecretString::from(code.to_string())
}

pub fn validate_otp_format(otp: &SecretString) -> Result<(), OtpVerifyError> {
    if OTP_PATTERN.is_match(otp.expose_secret()) {
        Ok(())
    } else {
        Err(OtpVerifyError::ValidationError(
            "OTP must be a 6 digit code".to_string(),
        ))
    }
}

pub fn validate_new_password(new_password: &SecretString) -> Result<(), OtpVerifyError> {
    if new_password.expose_secret().chars().count() < 8 {
        Err(OtpVerifyError::ValidationError(
            "Password must be at least 8 characters long".to_string(),
        ))
    } else {
        Ok(())
    }
}

fn hash_secret(secret: SecretString, params: Params) -> Result<SecretString, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let secret_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(secret.expose_secret().as_bytes(), &salt)?
        .to_string();
    Ok(SecretString::from(secret_hash))
}

/// OTP records are short-lived; a lighter cost than the credential hash is
/// enough for a secret that dies within minutes.
pub fn compute_otp_hash(code: SecretString) -> Result<SecretString, anyhow::Error> {
    hash_secret(code, Params::new(4096, 3, 1, None).unwrap())
}

pub fn compute_password_hash(password: SecretString) -> Result<SecretString, anyhow::Error> {
    hash_secret(password, Params::new(15000, 2, 1, None).unwrap())
}

#[tracing::instrument(name = "Verify secret hash", skip(expected_hash, candidate))]
pub fn verify_secret_hash(
    expected_hash: SecretString,
    candidate: SecretString,
) -> Result<(), anyhow::Error> {
    let expected_hash = PasswordHash::new(expected_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(candidate.expose_secret().as_bytes(), &expected_hash)
        .context("Secret does not match the stored hash.")
}

/// Issuance flow: enforce the single-active-secret invariant, persist a fresh
/// hashed code and dispatch it. The caller masks the account-not-found case;
/// this function simply does nothing for it.
#[tracing::instrument(name = "Dispatch password reset OTP", skip(store, email_service, otp_settings))]
pub async fn dispatch_password_reset_otp(
    store: &dyn PasswordResetStore,
    email_service: &dyn GenericEmailService,
    otp_settings: &OtpSetting,
    email: &EmailObject,
) -> Result<(), OtpSendError> {
    let user = store.find_user_by_email(email.get()).await.map_err(|e| {
        OtpSendError::DatabaseError(
            "Something went wrong while looking up the account".to_string(),
            e,
        )
    })?;
    if user.is_none() {
        tracing::info!("No account found for the requested email; returning the masked response");
        return Ok(());
    }

    store.delete_otps_for_email(email.get()).await.map_err(|e| {
        OtpSendError::DatabaseError(
            "Something went wrong while clearing previous OTP records".to_string(),
            e,
        )
    })?;

    let code = generate_otp_code();
    let code_to_hash = SecretString::from(code.expose_secret().to_string());
    let secret_hash = spawn_blocking_with_tracing(move || compute_otp_hash(code_to_hash))
        .await
        .context("Failed to spawn blocking task.")
        .map_err(OtpSendError::UnexpectedError)?
        .context("Failed to hash the OTP")
        .map_err(OtpSendError::UnexpectedError)?;

    let now = Utc::now();
    let record = OtpRecordModel {
        id: Uuid::new_v4(),
        email: email.get().to_string(),
        secret_hash: secret_hash.expose_secret().to_string(),
        expires_at: now + Duration::minutes(otp_settings.expiry_minutes),
        created_at: now,
    };
    store.insert_otp(&record).await.map_err(|e| {
        OtpSendError::DatabaseError(
            "Something went wrong while saving the OTP record".to_string(),
            e,
        )
    })?;

    let body = format!(
        "Your password reset code is {}. It expires in {} minutes.",
        code.expose_secret(),
        otp_settings.expiry_minutes
    );
    if let Err(e) = email_service
        .send_text_email(email.get(), OTP_EMAIL_SUBJECT, body)
        .await
    {
        tracing::error!("Failed to dispatch OTP email: {:?}", e);
        // Dispatch failed, so the stored secret can never reach the user;
        // remove it so no orphaned record survives.
        if let Err(cleanup_err) = store.delete_otps_for_email(email.get()).await {
            tracing::error!(
                "Failed to clean up OTP records after dispatch failure: {:?}",
                cleanup_err
            );
        }
        return Err(OtpSendError::DispatchError(e));
    }

    Ok(())
}

/// Verification flow: expiry check, constant-time comparison against the
/// stored hash, then the atomic credential-update-plus-consumption.
#[tracing::instrument(name = "Verify OTP and reset password", skip(store, otp, new_password))]
pub async fn verify_otp_and_reset_password(
    store: &dyn PasswordResetStore,
    email: &EmailObject,
    otp: SecretString,
    new_password: SecretString,
) -> Result<(), OtpVerifyError> {
    let record = store
        .latest_otp_for_email(email.get())
        .await
        .map_err(|e| {
            OtpVerifyError::DatabaseError(
                "Something went wrong while fetching the OTP record".to_string(),
                e,
            )
        })?
        .ok_or(OtpVerifyError::InvalidOtp)?;

    if record.expires_at <= Utc::now() {
        store.delete_otp_by_id(record.id).await.map_err(|e| {
            OtpVerifyError::DatabaseError(
                "Something went wrong while discarding the expired OTP".to_string(),
                e,
            )
        })?;
        return Err(OtpVerifyError::OtpExpired);
    }

    let expected_hash = SecretString::from(record.secret_hash.clone());
    let verification = spawn_blocking_with_tracing(move || verify_secret_hash(expected_hash, otp))
        .await
        .context("Failed to spawn blocking task.")
        .map_err(OtpVerifyError::UnexpectedError)?;
    if verification.is_err() {
        // The record is kept: retries are allowed within the TTL window.
        return Err(OtpVerifyError::InvalidOtp);
    }

    let user = store.find_user_by_email(email.get()).await.map_err(|e| {
        OtpVerifyError::DatabaseError(
            "Something went wrong while looking up the account".to_string(),
            e,
        )
    })?;
    let Some(user) = user else {
        // Data drift between the user table and the OTP table; the code was
        // proven, but there is no credential left to reset.
        store.delete_otp_by_id(record.id).await.map_err(|e| {
            OtpVerifyError::DatabaseError(
                "Something went wrong while discarding the orphaned OTP".to_string(),
                e,
            )
        })?;
        return Err(OtpVerifyError::NotFound("User account not found".to_string()));
    };

    let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(new_password))
        .await
        .context("Failed to spawn blocking task.")
        .map_err(OtpVerifyError::UnexpectedError)?
        .context("Failed to hash password")
        .map_err(OtpVerifyError::UnexpectedError)?;

    store
        .commit_password_reset(user.id, password_hash, record.id)
        .await
        .map_err(|e| {
            OtpVerifyError::DatabaseError(
                "Something went wrong while resetting the password".to_string(),
                e,
            )
        })?;

    // Best-effort sweep of any other surviving records for the email.
    if let Err(e) = store.delete_otps_for_email(email.get()).await {
        tracing::warn!("Failed to sweep surviving OTP records for {}: {:?}", email, e);
    }

    Ok(())
}
