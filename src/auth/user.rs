//! Identity domain models and their request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::UserId;

/// Role attached to every identity; gates endpoint access.
///
/// Wire and storage names follow the hospital's vocabulary (`doctor` for
/// clinicians).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    #[serde(rename = "doctor")]
    Clinician,
    #[serde(rename = "nurse")]
    Nurse,
    #[default]
    #[serde(rename = "patient")]
    Patient,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Administrator, Role::Clinician, Role::Nurse, Role::Patient];

    /// Roles that make up the care team (everyone except patients).
    pub const STAFF: [Role; 3] = [Role::Administrator, Role::Clinician, Role::Nurse];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Clinician => "doctor",
            Role::Nurse => "nurse",
            Role::Patient => "patient",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Administrator),
            "doctor" => Ok(Role::Clinician),
            "nurse" => Ok(Role::Nurse),
            "patient" => Ok(Role::Patient),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Error returned when role parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// A registered identity. The password hash is deliberately not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl User {
    /// Normalize email to lowercase for consistent storage and comparison.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// New user creation payload; `password_hash` is already a bcrypt hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Request to register a new identity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 72, message = "Password must be 1 to 72 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "Full name cannot be empty"))]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    pub phone: Option<String>,
}

/// User authentication credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: a bearer token plus the identity it asserts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl LoginResponse {
    pub fn bearer(access_token: String, user: User) -> Self {
        Self { access_token, token_type: "bearer".to_string(), user }
    }
}
