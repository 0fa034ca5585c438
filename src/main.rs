use campus_lost_found::{
    commands::run_custom_commands,
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_json_subscriber, init_subscriber},
};

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_json_subscriber("campus-lost-found".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return run_custom_commands(args).await;
    }

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
