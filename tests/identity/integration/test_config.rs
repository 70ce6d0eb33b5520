//! Configuration file layering, environment overrides and validation.

use std::env;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use caregate::config::AppConfig;
use caregate::CaregateError;

// Serializes tests that load configuration, since loading reads CAREGATE__* variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const SECRET_VAR: &str = "CAREGATE__AUTH__JWT_SECRET";
const CORS_VAR: &str = "CAREGATE__SERVER__CORS_ORIGINS";

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_values_override_defaults() {
    let _guard = env_guard();
    let file = write_config(
        r#"
[server]
port = 9100
cors_origins = ["http://localhost:3000"]

[auth]
jwt_secret = "file-provided-secret-0123456789abcdef"
token_ttl_minutes = 60
bcrypt_cost = 4
"#,
    );

    let config = AppConfig::load(Some(file.path())).expect("load config");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.cors_origins, vec!["http://localhost:3000".to_string()]);
    assert_eq!(config.auth.token_ttl_minutes, 60);
    assert_eq!(config.auth.bcrypt_cost, 4);
    assert_eq!(config.server.host, "127.0.0.1");
    assert!(config.database.is_in_memory());
}

#[test]
fn environment_overrides_file_and_defaults() {
    let _guard = env_guard();
    let file = write_config(
        r#"
[server]
port = 9100
cors_origins = ["http://from-file"]

[auth]
jwt_secret = "file-provided-secret-0123456789abcdef"
bcrypt_cost = 4
"#,
    );

    env::set_var(SECRET_VAR, "env-provided-secret-0123456789abcdef");
    env::set_var(CORS_VAR, "a,b");
    let result = AppConfig::load(Some(file.path()));
    env::remove_var(SECRET_VAR);
    env::remove_var(CORS_VAR);

    let config = result.expect("load config");
    assert_eq!(config.auth.jwt_secret, "env-provided-secret-0123456789abcdef");
    assert_eq!(config.server.cors_origins, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.auth.bcrypt_cost, 4);
    assert_eq!(config.auth.token_ttl_minutes, 1440);
}

#[test]
fn environment_secret_satisfies_validation_without_a_file() {
    let _guard = env_guard();

    env::set_var(SECRET_VAR, "env-only-secret-0123456789abcdef0123");
    let result = AppConfig::load(None);
    env::remove_var(SECRET_VAR);

    let config = result.expect("load config");
    assert_eq!(config.auth.jwt_secret, "env-only-secret-0123456789abcdef0123");
    assert!(config.server.cors_origins.is_empty());
}

#[test]
fn short_secret_is_rejected() {
    let _guard = env_guard();
    let file = write_config(
        r#"
[auth]
jwt_secret = "too-short"
"#,
    );

    let err = AppConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, CaregateError::Validation { .. }), "{err}");
    assert!(err.to_string().contains("auth.jwt_secret"), "{err}");
}
