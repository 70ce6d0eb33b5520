//! Credential verifier: password hashing plus session token signing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::hashing::PasswordHasher;
use crate::auth::jwt::{TokenError, TokenSigner};
use crate::config::AuthConfig;
use crate::domain::UserId;
use crate::errors::{CaregateError, Result};

/// Stateless verifier shared by the login service and the access controller.
///
/// Cloning is cheap; the signing keys live behind an `Arc`.
#[derive(Clone, Debug)]
pub struct CredentialVerifier {
    hasher: PasswordHasher,
    signer: Arc<TokenSigner>,
}

impl CredentialVerifier {
    pub fn new(hasher: PasswordHasher, signer: TokenSigner) -> Self {
        Self { hasher, signer: Arc::new(signer) }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(CaregateError::config("auth.jwt_secret must be set"));
        }
        let hasher = PasswordHasher::new(config.bcrypt_cost)?;
        let signer = TokenSigner::new(config.jwt_secret.as_bytes(), config.token_ttl());
        Ok(Self::new(hasher, signer))
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub fn hash(&self, secret: &str) -> Result<String> {
        self.hasher.hash(secret)
    }

    pub fn verify(&self, secret: &str, hash: &str) -> Result<bool> {
        self.hasher.verify(secret, hash)
    }

    /// [`Self::hash`] on the blocking pool so bcrypt does not stall the executor.
    pub async fn hash_async(&self, secret: &str) -> Result<String> {
        let hasher = self.hasher;
        let secret = secret.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&secret)).await.map_err(|e| {
            CaregateError::internal_with_source("password hashing task failed", Box::new(e))
        })?
    }

    /// [`Self::verify`] on the blocking pool.
    pub async fn verify_async(&self, secret: &str, hash: &str) -> Result<bool> {
        let hasher = self.hasher;
        let secret = secret.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &hash)).await.map_err(|e| {
            CaregateError::internal_with_source("password verification task failed", Box::new(e))
        })?
    }

    pub fn issue_token(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> std::result::Result<String, TokenError> {
        self.signer.issue_token(user_id, now)
    }

    pub fn verify_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<UserId, TokenError> {
        self.signer.verify_token(token, now)
    }
}
