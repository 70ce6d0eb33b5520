//! Register → login → authenticate → authorize, driven through the services.

use caregate::auth::{
    authorize, scope_to_owner, AuthError, LoginRequest, RecordKey, RegisterRequest, Role,
    TokenError, Unauthenticated,
};
use chrono::{Duration, Utc};

use crate::support::setup_test_app;

fn register_request(email: &str, password: &str, role: Role) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        full_name: "Flow Test".to_string(),
        role,
        phone: Some("+1-555-0100".to_string()),
    }
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest { email: email.to_string(), password: password.to_string() }
}

#[tokio::test]
async fn patient_end_to_end() {
    let app = setup_test_app();

    let registered = app
        .login_service
        .register(register_request("a@x.com", "p1", Role::Patient))
        .await
        .expect("register");

    let wrong = app.login_service.login(login_request("a@x.com", "p2")).await.unwrap_err();
    assert!(matches!(wrong, AuthError::Unauthenticated(Unauthenticated::InvalidCredentials)));

    let session = app.login_service.login(login_request("a@x.com", "p1")).await.expect("login");
    let identity = app.access.authenticate(&session.access_token).await.expect("authenticate");
    assert_eq!(identity.email, "a@x.com");
    assert_eq!(identity.id, registered.id);

    assert!(matches!(authorize(&identity, &[Role::Administrator]), Err(AuthError::Forbidden)));
    assert!(authorize(&identity, &[Role::Patient, Role::Nurse]).is_ok());

    assert_eq!(scope_to_owner(&identity, "another-record"), RecordKey::Linked(&identity.id));
}

#[tokio::test]
async fn staff_keep_requested_keys() {
    let app = setup_test_app();
    app.login_service
        .register(register_request("doc@x.com", "secret", Role::Clinician))
        .await
        .expect("register");

    let session =
        app.login_service.login(login_request("DOC@x.com", "secret")).await.expect("login");
    let identity = app.access.authenticate(&session.access_token).await.expect("authenticate");

    assert_eq!(identity.role, Role::Clinician);
    assert!(authorize(&identity, &Role::STAFF).is_ok());
    assert_eq!(scope_to_owner(&identity, "patient-42"), RecordKey::Requested("patient-42"));
}

#[tokio::test]
async fn token_is_rejected_at_and_after_expiry() {
    let app = setup_test_app();
    let user = app
        .login_service
        .register(register_request("n@x.com", "pw", Role::Nurse))
        .await
        .expect("register");

    let issued_at = Utc::now();
    let token = app.credentials.issue_token(&user.id, issued_at).expect("issue");
    let ttl = app.credentials.signer().ttl();

    let just_before = issued_at + ttl - Duration::seconds(1);
    assert!(app.access.authenticate_at(&token, just_before).await.is_ok());

    for now in [issued_at + ttl, issued_at + ttl + Duration::days(1)] {
        let err = app.access.authenticate_at(&token, now).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Unauthenticated(Unauthenticated::Token(TokenError::Expired))
        ));
    }
}

#[tokio::test]
async fn deactivated_identity_loses_access() {
    let app = setup_test_app();
    let user = app
        .login_service
        .register(register_request("gone@x.com", "pw", Role::Patient))
        .await
        .expect("register");
    let session = app.login_service.login(login_request("gone@x.com", "pw")).await.expect("login");

    app.users.set_active(&user.id, false);

    let err = app.access.authenticate(&session.access_token).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated(Unauthenticated::InactiveIdentity)));

    let err = app.login_service.login(login_request("gone@x.com", "pw")).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated(Unauthenticated::InactiveIdentity)));
}
