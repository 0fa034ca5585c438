use crate::configuration::{DatabaseSetting, OtpSetting, Settings};
use crate::email_client::GenericEmailService;
use crate::openapi::ApiDoc;
use crate::routes::main_route;
use crate::stores::{PasswordResetStore, PgResetStore};
use crate::utils::create_email_client;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres;
use sqlx::postgres::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let email_client = create_email_client(&configuration.email_client)?;
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        tracing::info!("Listening on {}", address);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, connection_pool, email_client, configuration.otp).await?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // Only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSetting) -> PgPool {
    postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_client: Arc<dyn GenericEmailService>,
    otp_settings: OtpSetting,
) -> Result<Server, anyhow::Error> {
    let store: Arc<dyn PasswordResetStore> = Arc::new(PgResetStore::new(db_pool));
    let store = web::Data::from(store);
    let email_client = web::Data::from(email_client);
    let otp_settings = web::Data::new(otp_settings);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(email_client.clone())
            .app_data(otp_settings.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(main_route)
    })
    .workers(4)
    .listen(listener)?
    .run();

    Ok(server)
}
