//! # REST API
//!
//! HTTP boundary for the identity core: routing, bearer middleware wiring,
//! handlers, error mapping and the OpenAPI document.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::{bind_listener, start_api_server};
