use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use caregate::{
    api::{build_router, ApiState},
    auth::{hashing::MIN_COST, AccessController, CredentialVerifier, LoginService},
    config::AppConfig,
    startup,
    storage::InMemoryUserRepository,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub config: AppConfig,
    pub state: ApiState,
    pub users: Arc<InMemoryUserRepository>,
    pub login_service: LoginService,
    pub access: AccessController,
    pub credentials: CredentialVerifier,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config.server)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.auth.bcrypt_cost = MIN_COST;
    config
}

pub fn setup_test_app() -> TestApp {
    let config = test_config();
    let users = Arc::new(InMemoryUserRepository::new());
    let state = startup::api_state(&config, users.clone()).expect("build api state");

    let credentials = CredentialVerifier::from_config(&config.auth).expect("credential verifier");
    let login_service = LoginService::new(credentials.clone(), users.clone());
    let access = AccessController::new(credentials.clone(), users.clone());

    TestApp { config, state, users, login_service, access, credentials }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

/// Register through the API and return the created user's id.
pub async fn register(app: &TestApp, email: &str, password: &str, role: &str) -> String {
    let response = send_request(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "full_name": format!("{role} user"),
            "role": role
        })),
    )
    .await;
    assert_eq!(response.status(), 201, "register {email}");
    let body: Value = read_json(response).await;
    body["id"].as_str().expect("user id").to_string()
}

/// Log in through the API and return the bearer token.
pub async fn login(app: &TestApp, email: &str, password: &str) -> String {
    let response = send_request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status(), 200, "login {email}");
    let body: Value = read_json(response).await;
    body["access_token"].as_str().expect("access token").to_string()
}
