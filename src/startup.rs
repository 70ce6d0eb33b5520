//! Startup sequence: wire the user store, credential verifier and services
//! into the HTTP state, then serve.

use std::sync::Arc;

use tracing::info;

use crate::api::{start_api_server, ApiState};
use crate::auth::{AccessController, CredentialVerifier, LoginService};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::{build_user_repository, UserRepository};

/// Assemble handler state over an existing user store.
pub fn api_state(config: &AppConfig, users: Arc<dyn UserRepository>) -> Result<ApiState> {
    let credentials = CredentialVerifier::from_config(&config.auth)?;
    let login_service = LoginService::new(credentials.clone(), users.clone());
    let access = AccessController::new(credentials, users.clone());
    Ok(ApiState::new(login_service, access, users))
}

/// Build every component from configuration and run the API server until ctrl-c.
pub async fn run(config: AppConfig) -> Result<()> {
    let users = build_user_repository(&config.database).await?;
    let state = api_state(&config, users)?;

    info!(
        token_ttl_minutes = config.auth.token_ttl_minutes,
        bcrypt_cost = config.auth.bcrypt_cost,
        "Credential verifier ready"
    );

    start_api_server(&config.server, state).await
}
