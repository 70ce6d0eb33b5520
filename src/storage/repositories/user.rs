//! User repository
//!
//! Read/insert access to registered identities. The password hash only leaves
//! the store through [`UserRepository::get_user_with_password`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::instrument;

use crate::auth::user::{NewUser, Role, User};
use crate::domain::UserId;
use crate::errors::{CaregateError, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String)> {
        let role = Role::from_str(&self.role).map_err(|_| {
            CaregateError::validation(format!("Unknown user role '{}'", self.role))
        })?;

        let user = User {
            id: UserId::from_string(self.id),
            email: self.email,
            full_name: self.full_name,
            role,
            phone: self.phone,
            created_at: self.created_at,
            is_active: self.is_active,
        };
        Ok((user, self.password_hash))
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, full_name, role, phone, is_active, created_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Conflict` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get a user by (normalized) email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get a user with their password hash for authentication
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>>;

    /// List users ordered by creation time
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>>;
}

/// PostgreSQL-backed user repository.
#[derive(Debug, Clone)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_row(&self, column: &str, value: &str) -> Result<Option<UserRow>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| CaregateError::database(err, "Failed to fetch user"))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role), name = "db_create_user")]
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, role, phone, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(&user.phone)
        .bind(user.is_active)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        if let Err(err) = result {
            let err = CaregateError::database(err, "Failed to create user");
            if err.is_unique_violation() {
                return Err(CaregateError::conflict("Email already registered", "user"));
            }
            return Err(err);
        }

        self.get_user(&user.id)
            .await?
            .ok_or_else(|| CaregateError::internal("User not found after creation"))
    }

    #[instrument(skip(self), fields(user_id = %id), name = "db_get_user")]
    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        self.fetch_row("id", id.as_str())
            .await?
            .map(|row| row.into_user().map(|(user, _)| user))
            .transpose()
    }

    #[instrument(skip(self, email), name = "db_get_user_by_email")]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.fetch_row("email", email)
            .await?
            .map(|row| row.into_user().map(|(user, _)| user))
            .transpose()
    }

    #[instrument(skip(self, email), name = "db_get_user_with_password")]
    async fn get_user_with_password(&self, email: &str) -> Result<Option<(User, String)>> {
        self.fetch_row("email", email).await?.map(UserRow::into_user).transpose()
    }

    #[instrument(skip(self), name = "db_list_users")]
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| CaregateError::database(err, "Failed to list users"))?;

        rows.into_iter().map(|row| row.into_user().map(|(user, _)| user)).collect()
    }
}
