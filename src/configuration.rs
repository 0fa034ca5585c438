use config::{ConfigError, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::{postgres::PgConnectOptions, ConnectOptions};

use crate::domain::EmailObject;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSetting,
    pub database: DatabaseSetting,
    pub email_client: EmailClientSetting,
    pub otp: OtpSetting,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSetting {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSetting {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub name: String,
}

impl DatabaseSetting {
    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.name)
            .log_statements(tracing::log::LevelFilter::Trace)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Smtp,
    Dummy,
}

#[derive(Debug, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub username: String,
    pub password: SecretString,
    pub sender_email: String,
    pub provider: EmailProvider,
}

impl EmailClientSetting {
    pub fn sender(&self) -> Result<EmailObject, String> {
        EmailObject::parse(self.sender_email.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OtpSetting {
    pub expiry_minutes: i64,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    let builder = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("configuration.yaml"),
        ))
        .add_source(Environment::default().separator("_"))
        .build()?;
    builder.try_deserialize::<Settings>()
}
