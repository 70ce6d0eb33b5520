use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::auth::access::{AuthError, Unauthenticated};
use crate::auth::jwt::TokenError;
use crate::errors::CaregateError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "unauthorized")]
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (error_kind, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Conflict(msg) => ("conflict", msg),
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::Unauthorized(msg) => ("unauthorized", msg),
            ApiError::Forbidden(msg) => ("forbidden", msg),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
            ApiError::Internal(msg) => ("internal_error", msg),
        };

        let body = ErrorBody { error: error_kind.to_string(), message };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CaregateError> for ApiError {
    fn from(err: CaregateError) -> Self {
        match err {
            CaregateError::Validation { message, .. } => ApiError::BadRequest(message),
            CaregateError::Serialization { context, .. } => ApiError::BadRequest(context),
            CaregateError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{resource_type} '{id}' not found"))
            }
            CaregateError::Conflict { message, .. } => ApiError::Conflict(message),
            CaregateError::Database { source, context } => {
                error!(error = %source, %context, "user store unavailable");
                ApiError::ServiceUnavailable("User store unavailable".to_string())
            }
            other => {
                error!(error = %other, "request failed");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(reason) => {
                ApiError::Unauthorized(unauthorized_message(&reason))
            }
            AuthError::Forbidden => {
                ApiError::Forbidden("Forbidden: insufficient permissions".to_string())
            }
            AuthError::Persistence(err) => ApiError::from(err),
        }
    }
}

fn unauthorized_message(reason: &Unauthenticated) -> String {
    let detail = match reason {
        Unauthenticated::MissingBearer => "missing bearer token",
        Unauthenticated::Token(TokenError::Expired) => "token has expired",
        Unauthenticated::Token(TokenError::InvalidSignature) => "token signature is invalid",
        Unauthenticated::Token(_) => "malformed bearer token",
        Unauthenticated::UnknownIdentity => "could not validate credentials",
        Unauthenticated::InactiveIdentity => "account is inactive",
        Unauthenticated::InvalidCredentials => "incorrect email or password",
    };
    format!("Unauthorized: {detail}")
}

impl ApiError {
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ApiError::NotFound(msg.into())
    }
}
