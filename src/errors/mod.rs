//! # Error Handling
//!
//! Crate-wide error handling. Domain errors are modelled with `thiserror` in
//! [`types`]; the authentication layer keeps its own narrower taxonomy in
//! [`crate::auth::access::AuthError`] and [`crate::auth::jwt::TokenError`].

pub mod types;

pub use types::{CaregateError, Result};

/// Short alias used throughout the crate.
pub type Error = CaregateError;
