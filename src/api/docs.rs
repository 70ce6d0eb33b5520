use axum::{routing::get, Json, Router};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::root_handler,
        crate::api::handlers::auth::register_handler,
        crate::api::handlers::auth::login_handler,
        crate::api::handlers::auth::me_handler,
        crate::api::handlers::users::list_users_handler,
        crate::api::handlers::users::get_user_handler
    ),
    components(
        schemas(
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::RootResponse,
            crate::api::error::ErrorBody,
            crate::auth::user::User,
            crate::auth::user::Role,
            crate::auth::user::RegisterRequest,
            crate::auth::user::LoginRequest,
            crate::auth::user::LoginResponse,
            crate::domain::UserId
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and service banner"),
        (name = "auth", description = "Registration, login and current identity"),
        (name = "users", description = "Identity directory")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build(),
            ),
        );
    }
}

/// Serves the generated document at `/api/openapi.json`.
pub fn docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
