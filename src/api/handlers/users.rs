//! Identity directory endpoints.
//!
//! Listing is administrator-only. Single lookups are open to every role, but a
//! patient is always answered with their own profile.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::api::error::{ApiError, ErrorBody};
use crate::api::routes::ApiState;
use crate::auth::access::{authorize, scope_to_owner, RecordKey};
use crate::auth::user::{Role, User};
use crate::domain::UserId;

const MAX_PAGE_SIZE: i64 = 1000;

/// Query parameters for the user listing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Maximum number of users to return (default and cap: 1000)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of users to skip
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

impl ListUsersQuery {
    fn clamp(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_PAGE_SIZE), self.offset.max(0))
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Registered users", body = [User]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 403, description = "Administrator role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state, identity), fields(user_id = %identity.id))]
pub async fn list_users_handler(
    State(state): State<ApiState>,
    Extension(identity): Extension<User>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    authorize(&identity, &[Role::Administrator])?;

    let (limit, offset) = query.clamp();
    let users = state.users.list_users(limit, offset).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state, identity), fields(user_id = %identity.id, requested = %id))]
pub async fn get_user_handler(
    State(state): State<ApiState>,
    Extension(identity): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    authorize(&identity, &Role::ALL)?;

    let user_id = match scope_to_owner(&identity, &id) {
        RecordKey::Linked(own) => own.clone(),
        RecordKey::Requested(key) => UserId::from_str_unchecked(key),
    };

    let user = state
        .users
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user))
}
