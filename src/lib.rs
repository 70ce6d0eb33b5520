//! # Caregate
//!
//! Identity core of a hospital-management backend: password credentials,
//! stateless session tokens and role-based access for administrators,
//! clinicians, nurses and patients.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → bearer middleware → AccessController → CredentialVerifier
//!                                        ↓
//!                                  UserRepository (PostgreSQL | in-memory)
//! ```
//!
//! Handlers call [`auth::authorize`] with the roles they admit, and
//! [`auth::scope_to_owner`] whenever a caller-supplied record key is used.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod startup;
pub mod storage;

pub use config::AppConfig;
pub use errors::{CaregateError, Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
