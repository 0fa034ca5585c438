use crate::configuration::get_configuration;
use anyhow::Context;
use sqlx::PgPool;

#[tracing::instrument(name = "Run database migrations")]
pub async fn run_migrations() -> Result<(), anyhow::Error> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let connection_pool = PgPool::connect_with(configuration.database.with_db())
        .await
        .context("Failed to connect to Postgres.")?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .context("Failed to migrate the database")?;
    tracing::info!("Database migration completed");
    Ok(())
}
