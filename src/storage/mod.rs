//! # Storage and Persistence
//!
//! The user store: a [`UserRepository`] trait with PostgreSQL and in-memory
//! implementations, plus pool creation and embedded migrations.

pub mod pool;
pub mod repositories;

use std::sync::Arc;

pub use crate::config::DatabaseConfig;
pub use pool::{create_pool, DbPool};
pub use repositories::{InMemoryUserRepository, SqlxUserRepository, UserRepository};

use crate::errors::{CaregateError, Result};

/// Run embedded database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| CaregateError::database(e, "Database connectivity check failed"))?;

    Ok(())
}

/// Build the user repository selected by `database.url`.
pub async fn build_user_repository(config: &DatabaseConfig) -> Result<Arc<dyn UserRepository>> {
    if config.is_in_memory() {
        tracing::warn!("Using in-memory user store; identities are lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }

    let pool = create_pool(config).await?;
    check_connection(&pool).await?;
    Ok(Arc::new(SqlxUserRepository::new(pool)))
}
