//! # Configuration Management
//!
//! Layered configuration for the caregate backend: compiled-in defaults, an
//! optional configuration file, then `CAREGATE__SECTION__KEY` environment
//! variables. See [`settings::AppConfig::load`].

pub mod settings;

pub use settings::{
    AppConfig, AuthConfig, DatabaseConfig, ObservabilityConfig, ServerConfig, ENV_PREFIX,
    MEMORY_DATABASE_URL,
};
