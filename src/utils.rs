use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::configuration::{EmailClientSetting, EmailProvider};
use crate::email_client::{DummyEmailClient, GenericEmailService, SmtpEmailClient};

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(f))
}

#[tracing::instrument(name = "Create email client")]
pub fn create_email_client(
    config: &EmailClientSetting,
) -> Result<Arc<dyn GenericEmailService>, anyhow::Error> {
    match config.provider {
        EmailProvider::Smtp => Ok(Arc::new(SmtpEmailClient::new(config)?)),
        EmailProvider::Dummy => Ok(Arc::new(DummyEmailClient::new())),
    }
}
