use std::env;

use dotenvy::dotenv;

use nexuslink_crm::models::config::AppConfig;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let app_config = match AppConfig::load(&app_env) {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = nexuslink_crm::run(app_config).await {
        log::error!("{}", err.notice());
        std::process::exit(1);
    }
}
