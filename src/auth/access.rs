//! Access controller: bearer token → identity, role gate and ownership scoping.
//!
//! Each request is authenticated independently from its bearer token; there is
//! no session state. Handlers call [`authorize`] at their top and
//! [`scope_to_owner`] whenever a caller-supplied record key is addressed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::auth::credentials::CredentialVerifier;
use crate::auth::jwt::TokenError;
use crate::auth::user::{Role, User};
use crate::domain::UserId;
use crate::errors::CaregateError;
use crate::storage::UserRepository;

/// Why a request could not be tied to a live identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Unauthenticated {
    #[error("bearer token missing")]
    MissingBearer,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("identity no longer exists")]
    UnknownIdentity,
    #[error("identity is inactive")]
    InactiveIdentity,
    #[error("incorrect email or password")]
    InvalidCredentials,
}

/// Errors returned by the authentication/authorization layer.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(Unauthenticated),
    #[error("forbidden: insufficient permissions")]
    Forbidden,
    #[error(transparent)]
    Persistence(#[from] CaregateError),
}

impl AuthError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::Unauthenticated(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden)
    }
}

impl From<Unauthenticated> for AuthError {
    fn from(reason: Unauthenticated) -> Self {
        AuthError::Unauthenticated(reason)
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Unauthenticated(Unauthenticated::Token(err))
    }
}

/// Record key a handler should actually query after ownership scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey<'a> {
    /// The caller's own record, addressed through their identity id.
    Linked(&'a UserId),
    /// The caller-supplied key, unchanged.
    Requested(&'a str),
}

/// Succeeds iff the identity's role is one of `allowed_roles`.
pub fn authorize<'a>(identity: &'a User, allowed_roles: &[Role]) -> Result<&'a User, AuthError> {
    if allowed_roles.contains(&identity.role) {
        Ok(identity)
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Patients can only ever address their own record; other roles pass through.
pub fn scope_to_owner<'a>(identity: &'a User, requested_key: &'a str) -> RecordKey<'a> {
    match identity.role {
        Role::Patient => RecordKey::Linked(&identity.id),
        Role::Administrator | Role::Clinician | Role::Nurse => RecordKey::Requested(requested_key),
    }
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Result<&str, Unauthenticated> {
    let header = header.trim();
    let (scheme, token) = header.split_once(' ').ok_or(Unauthenticated::MissingBearer)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(Unauthenticated::MissingBearer);
    }
    Ok(token)
}

#[derive(Clone)]
pub struct AccessController {
    credentials: CredentialVerifier,
    users: Arc<dyn UserRepository>,
}

impl AccessController {
    pub fn new(credentials: CredentialVerifier, users: Arc<dyn UserRepository>) -> Self {
        Self { credentials, users }
    }

    /// Authenticate a raw token against the current clock.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Authenticate the value of an `Authorization: Bearer <token>` header.
    pub async fn authenticate_header(&self, header: &str) -> Result<User, AuthError> {
        let token = bearer_token(header)?;
        self.authenticate(token).await
    }

    /// Resolve the token's subject to a stored identity as of `now`.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated::Token` if the token is malformed, forged or expired
    /// - `Unauthenticated::UnknownIdentity` if the subject no longer exists
    /// - `Unauthenticated::InactiveIdentity` if the subject has been deactivated;
    ///   a deactivated account loses access immediately, even with an unexpired token
    /// - `Persistence` if the user store cannot be reached
    #[instrument(skip(self, token, now), fields(user_id = tracing::field::Empty))]
    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let user_id = match self.credentials.verify_token(token, now) {
            Ok(id) => id,
            Err(err) => {
                debug!(error = %err, "session token rejected");
                return Err(err.into());
            }
        };
        tracing::Span::current().record("user_id", user_id.as_str());

        let Some(user) = self.users.get_user(&user_id).await? else {
            warn!(user_id = %user_id, "token subject no longer exists");
            return Err(Unauthenticated::UnknownIdentity.into());
        };

        if !user.is_active {
            warn!(user_id = %user.id, "token presented for inactive identity");
            return Err(Unauthenticated::InactiveIdentity.into());
        }

        Ok(user)
    }
}
