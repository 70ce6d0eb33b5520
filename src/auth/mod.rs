//! Authentication and authorization.
//!
//! - [`hashing`] / [`jwt`] / [`credentials`]: password hashing and session tokens
//! - [`access`]: bearer token → identity, role gate, ownership scoping
//! - [`login_service`]: registration and login flows
//! - [`middleware`]: axum layer that authenticates each request

pub mod access;
pub mod credentials;
pub mod hashing;
pub mod jwt;
pub mod login_service;
pub mod middleware;
pub mod user;

pub use access::{
    authorize, scope_to_owner, AccessController, AuthError, RecordKey, Unauthenticated,
};
pub use credentials::CredentialVerifier;
pub use jwt::{Claims, TokenError, TokenSigner};
pub use login_service::LoginService;
pub use user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, Role, User};
