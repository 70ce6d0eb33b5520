use caregate::{
    cli::Cli,
    config::AppConfig,
    observability::{init_logging, log_config_info},
    startup, Result, APP_NAME, VERSION,
};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before any configuration is read from the environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    init_logging(&config.observability)?;
    info!(app_name = APP_NAME, version = VERSION, "Starting caregate");
    log_config_info(&config);

    if let Err(e) = startup::run(config).await {
        error!(error = %e, "caregate terminated with error");
        return Err(e);
    }

    info!("caregate shut down cleanly");
    Ok(())
}
