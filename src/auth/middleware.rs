//! Axum middleware that authenticates bearer tokens.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, warn, Instrument};

use crate::api::error::ApiError;
use crate::auth::access::AccessController;

pub type AccessState = Arc<AccessController>;

/// Resolve the caller's identity and store it as a [`crate::auth::user::User`]
/// request extension for the handlers behind this layer.
pub async fn authenticate(
    State(access): State<AccessState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %request.method(),
        http.path = %request.uri().path(),
        user_id = field::Empty,
        correlation_id = %correlation_id
    );

    let header =
        request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()).unwrap_or("");

    let outcome = access.authenticate_header(header).instrument(span.clone()).await;
    match outcome {
        Ok(user) => {
            span.record("user_id", field::display(&user.id));
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(err) => {
            span.in_scope(|| warn!(%correlation_id, error = %err, "authentication failed"));
            Err(err.into())
        }
    }
}
