//! # Observability Infrastructure
//!
//! Structured logging through the `tracing` ecosystem. HTTP request spans are
//! added by `tower_http::trace::TraceLayer` in [`crate::api::routes`].

pub mod logging;

pub use logging::{init_logging, log_config_info};
