//! Login service for email/password registration and authentication.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::auth::access::{AuthError, Unauthenticated};
use crate::auth::credentials::CredentialVerifier;
use crate::auth::user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User};
use crate::domain::UserId;
use crate::errors::{CaregateError, Result};
use crate::storage::UserRepository;

const DUMMY_SECRET: &str = "dummy_startup_value";

/// Registration and login flows on top of the credential verifier and user store.
#[derive(Clone)]
pub struct LoginService {
    credentials: CredentialVerifier,
    users: Arc<dyn UserRepository>,
    // Verified against when the email is unknown, so both paths cost one bcrypt run.
    dummy_hash: Arc<OnceCell<String>>,
}

impl LoginService {
    pub fn new(credentials: CredentialVerifier, users: Arc<dyn UserRepository>) -> Self {
        Self { credentials, users, dummy_hash: Arc::new(OnceCell::new()) }
    }

    pub fn credentials(&self) -> &CredentialVerifier {
        &self.credentials
    }

    /// Create a new identity.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email, password or name is rejected
    /// - `Conflict` if the (normalized) email is already registered
    #[instrument(skip(self, request), fields(role = %request.role))]
    pub async fn register(&self, mut request: RegisterRequest) -> Result<User> {
        request.email = User::normalize_email(&request.email);
        request.validate()?;

        let email = request.email;
        if self.users.get_user_by_email(&email).await?.is_some() {
            warn!(email = %email, "registration attempt for existing email");
            return Err(CaregateError::conflict("Email already registered", "user"));
        }

        let password_hash = self.credentials.hash_async(&request.password).await?;
        let user = self
            .users
            .create_user(NewUser {
                id: UserId::new(),
                email,
                password_hash,
                full_name: request.full_name.trim().to_string(),
                role: request.role,
                phone: request.phone.filter(|phone| !phone.trim().is_empty()),
                is_active: true,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Verify email/password and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, request))]
    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> std::result::Result<LoginResponse, AuthError> {
        let email = User::normalize_email(&request.email);

        let Some((user, password_hash)) = self.users.get_user_with_password(&email).await? else {
            let dummy = self.dummy_hash().await?;
            if let Err(e) = self.credentials.verify_async(&request.password, dummy).await {
                warn!(error = %e, "dummy hash verification failed unexpectedly");
            }
            warn!(email = %email, "login attempt for non-existent user");
            return Err(Unauthenticated::InvalidCredentials.into());
        };

        if !self.credentials.verify_async(&request.password, &password_hash).await? {
            warn!(user_id = %user.id, "login attempt with incorrect password");
            return Err(Unauthenticated::InvalidCredentials.into());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "login attempt for inactive user");
            return Err(Unauthenticated::InactiveIdentity.into());
        }

        let token = self.credentials.issue_token(&user.id, Utc::now()).map_err(|e| {
            AuthError::Persistence(CaregateError::internal(format!("failed to sign token: {e}")))
        })?;

        info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok(LoginResponse::bearer(token, user))
    }

    async fn dummy_hash(&self) -> Result<&str> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.credentials.hash_async(DUMMY_SECRET))
            .await?;
        Ok(hash.as_str())
    }
}
