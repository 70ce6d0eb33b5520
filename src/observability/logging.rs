//! # Structured Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level; JSON output is selected by `observability.json_logs`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, ObservabilityConfig};
use crate::errors::{CaregateError, Result};

/// Build the filter used by the subscriber.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            CaregateError::config_with_source(
                format!("Invalid log level '{}'", config.log_level),
                Box::new(e),
            )
        }),
    }
}

/// Initialize the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json_logs {
        registry.with(fmt::layer().json().with_current_span(true).with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| {
        CaregateError::config_with_source("Failed to install tracing subscriber", Box::new(e))
    })
}

/// Log configuration at startup (never includes the signing secret)
pub fn log_config_info(config: &AppConfig) {
    let database_type = if config.database.is_in_memory() { "memory" } else { "postgresql" };
    tracing::info!(
        service_name = %config.observability.service_name,
        server_address = %config.server.bind_address(),
        database_type,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        bcrypt_cost = config.auth.bcrypt_cost,
        json_logs = config.observability.json_logs,
        "caregate configuration"
    );
}
