//! HTTP surface: status codes, challenge headers, role gating and scoping.

use axum::http::{header::WWW_AUTHENTICATE, Method, StatusCode};
use serde_json::{json, Value};

use crate::support::{login, read_json, register, send_request, setup_test_app};

#[tokio::test]
async fn public_endpoints_answer_without_token() {
    let app = setup_test_app();

    let response = send_request(&app, Method::GET, "/api", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "running");

    let response = send_request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_request(&app, Method::GET, "/api/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert!(body["paths"]["/api/auth/login"].is_object());
}

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = setup_test_app();
    let response = send_request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "A@X.com", "password": "p1", "full_name": "Ada" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = read_json(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "patient");
    assert_eq!(body["is_active"], true);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_and_invalid_registrations() {
    let app = setup_test_app();
    register(&app, "a@x.com", "p1", "patient").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "a@X.COM", "password": "p2", "full_name": "Again" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "conflict");

    let response = send_request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "p2", "full_name": "Bad" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_are_401_with_challenge() {
    let app = setup_test_app();
    register(&app, "a@x.com", "p1", "patient").await;

    for (email, password) in [("a@x.com", "wrong"), ("nobody@x.com", "p1")] {
        let response = send_request(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}

#[tokio::test]
async fn login_response_shape() {
    let app = setup_test_app();
    register(&app, "nurse@x.com", "pw", "nurse").await;

    let response = send_request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "nurse@x.com", "password": "pw" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["role"], "nurse");
    assert_eq!(body["access_token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn secured_endpoints_require_bearer() {
    let app = setup_test_app();

    for path in ["/api/auth/me", "/api/users", "/api/users/anything"] {
        let response = send_request(&app, Method::GET, path, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "unauthorized");
    }

    let response = send_request(&app, Method::GET, "/api/auth/me", Some("not.a.jwt"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_token_identity() {
    let app = setup_test_app();
    let id = register(&app, "doc@x.com", "pw", "doctor").await;
    let token = login(&app, "doc@x.com", "pw").await;

    let response = send_request(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["role"], "doctor");
}

#[tokio::test]
async fn user_listing_is_admin_only() {
    let app = setup_test_app();
    register(&app, "admin@x.com", "pw", "admin").await;
    register(&app, "p@x.com", "pw", "patient").await;

    let patient = login(&app, "p@x.com", "pw").await;
    let response = send_request(&app, Method::GET, "/api/users", Some(&patient), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());

    let admin = login(&app, "admin@x.com", "pw").await;
    let response = send_request(&app, Method::GET, "/api/users", Some(&admin), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<Value> = read_json(response).await;
    assert_eq!(users.len(), 2);

    let response =
        send_request(&app, Method::GET, "/api/users?limit=1&offset=1", Some(&admin), None).await;
    let users: Vec<Value> = read_json(response).await;
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn patients_only_ever_see_themselves() {
    let app = setup_test_app();
    let own = register(&app, "p1@x.com", "pw", "patient").await;
    let other = register(&app, "p2@x.com", "pw", "patient").await;

    let token = login(&app, "p1@x.com", "pw").await;
    let response =
        send_request(&app, Method::GET, &format!("/api/users/{other}"), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], own.as_str());
    assert_eq!(body["email"], "p1@x.com");
}

#[tokio::test]
async fn staff_lookups_use_requested_id() {
    let app = setup_test_app();
    let patient = register(&app, "p@x.com", "pw", "patient").await;
    register(&app, "n@x.com", "pw", "nurse").await;

    let token = login(&app, "n@x.com", "pw").await;
    let response =
        send_request(&app, Method::GET, &format!("/api/users/{patient}"), Some(&token), None)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], patient.as_str());

    let response =
        send_request(&app, Method::GET, "/api/users/does-not-exist", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
