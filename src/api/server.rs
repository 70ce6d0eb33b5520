use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::{CaregateError, Result};

use super::routes::{build_router, ApiState};

/// Bind the configured host and port. The host may be a name such as `localhost`.
pub async fn bind_listener(config: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port)).await.map_err(|e| CaregateError::Io {
        source: e,
        context: format!("Failed to bind API server to {}", config.bind_address()),
    })
}

pub async fn start_api_server(config: &ServerConfig, state: ApiState) -> Result<()> {
    let router: Router = build_router(state, config);
    let listener = bind_listener(config).await?;

    match listener.local_addr() {
        Ok(addr) => info!(address = %addr, "Starting HTTP API server"),
        Err(_) => info!(address = %config.bind_address(), "Starting HTTP API server"),
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "API server shutdown listener failed");
            }
        })
        .await
        .map_err(|e| CaregateError::Io { source: e, context: "API server error".to_string() })?;

    info!("API server shutdown completed");
    Ok(())
}
