use crate::{configuration::EmailClientSetting, domain::EmailObject};
use async_trait::async_trait;
use lettre::{
    transport::smtp::{authentication::Credentials, PoolConfig},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use std::time::Duration;

#[async_trait]
pub trait GenericEmailService: Send + Sync {
    async fn send_text_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), anyhow::Error>;
}

pub struct SmtpEmailClient {
    pub sender: EmailObject,
    pub mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailClient {
    #[tracing::instrument]
    pub fn new(email_config: &EmailClientSetting) -> Result<Self, anyhow::Error> {
        let sender = email_config
            .sender()
            .map_err(|e| anyhow::anyhow!("Invalid sender email address: {}", e))?;
        let smtp_credentials = Credentials::new(
            email_config.username.to_string(),
            email_config.password.expose_secret().to_string(),
        );
        tracing::info!("Establishing connection to the SMTP server.");
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&email_config.base_url)?
                .credentials(smtp_credentials)
                .pool_config(
                    PoolConfig::new()
                        .min_idle(3)
                        .max_size(10)
                        .idle_timeout(Duration::new(300, 0)),
                )
                .build();

        tracing::info!("SMTP connection created successfully");
        Ok(Self { sender, mailer })
    }
}

#[async_trait]
impl GenericEmailService for SmtpEmailClient {
    async fn send_text_email(
        &self,
        to: &str,
        subject: &str,
        body: String,
    ) -> Result<(), anyhow::Error> {
        let email = Message::builder()
            .from(self.sender.as_ref().parse()?)
            .to(to.parse()?)
            .subject(subject)
            .body(body)?;

        tracing::info!("Sending email to {}", to);
        self.mailer.send(email).await?;
        tracing::info!("Mail sent successfully");
        Ok(())
    }
}

pub struct DummyEmailClient {}

impl DummyEmailClient {
    pub fn new() -> Self {
        tracing::info!("Establishing dummy connection to the SMTP server.");
        Self {}
    }
}

impl Default for DummyEmailClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenericEmailService for DummyEmailClient {
    async fn send_text_email(
        &self,
        to: &str,
        _subject: &str,
        _body: String,
    ) -> Result<(), anyhow::Error> {
        tracing::info!("Dummy email client invoked for {}", to);
        Ok(())
    }
}
