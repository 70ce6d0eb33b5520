use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::auth::{access::AccessController, login_service::LoginService, middleware::authenticate};
use crate::config::ServerConfig;
use crate::storage::UserRepository;

use super::{
    docs,
    handlers::{
        get_user_handler, health_handler, list_users_handler, login_handler, me_handler,
        register_handler, root_handler,
    },
};

/// Shared handler state. Every field is an explicit context object; nothing
/// is read from process globals.
#[derive(Clone)]
pub struct ApiState {
    pub login_service: LoginService,
    pub access: Arc<AccessController>,
    pub users: Arc<dyn UserRepository>,
}

impl ApiState {
    pub fn new(
        login_service: LoginService,
        access: AccessController,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { login_service, access: Arc::new(access), users }
    }
}

pub fn build_router(state: ApiState, server: &ServerConfig) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.access.clone(), authenticate);

    let secured_api = Router::new()
        .route("/api/auth/me", get(me_handler))
        .route("/api/users", get(list_users_handler))
        .route("/api/users/{id}", get(get_user_handler))
        .route_layer(auth_layer);

    let public_api = Router::new()
        .route("/health", get(health_handler))
        .route("/api", get(root_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler));

    Router::new()
        .merge(public_api)
        .merge(secured_api)
        .merge(docs::docs_router())
        .with_state(state)
        .layer(cors_layer(&server.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(parsed))
}
