//! # Error Types
//!
//! Error taxonomy for the caregate backend using `thiserror`.

use validator::{ValidationErrors, ValidationErrorsKind};

/// Custom result type for caregate operations
pub type Result<T> = std::result::Result<T, CaregateError>;

/// Main error type for the caregate backend
#[derive(thiserror::Error, Debug)]
pub enum CaregateError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    /// Resource conflict errors (e.g., email already registered)
    #[error("Resource conflict: {message}")]
    Conflict { message: String, resource_type: String },

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CaregateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create an internal server error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into(), source: None }
    }

    pub fn internal_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Internal { message: message.into(), source: Some(source) }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound { resource_type: resource_type.into(), id: id.into() }
    }

    /// Create a conflict error
    pub fn conflict<M: Into<String>, R: Into<String>>(message: M, resource_type: R) -> Self {
        Self::Conflict { message: message.into(), resource_type: resource_type.into() }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CaregateError::Config { .. } => 500,
            CaregateError::Database { .. } => 500,
            CaregateError::Io { .. } => 500,
            CaregateError::Serialization { .. } => 400,
            CaregateError::Validation { .. } => 400,
            CaregateError::Internal { .. } => 500,
            CaregateError::NotFound { .. } => 404,
            CaregateError::Conflict { .. } => 409,
        }
    }

    /// True when the underlying database reported a unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            CaregateError::Database { source, .. } => source
                .as_database_error()
                .map(|db_err| db_err.is_unique_violation())
                .unwrap_or(false),
            _ => false,
        }
    }
}

// Error conversions for common external error types
impl From<sqlx::Error> for CaregateError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database { source: error, context: "Database operation failed".to_string() }
    }
}

impl From<sqlx::migrate::MigrateError> for CaregateError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        Self::internal_with_source("Database migration failed", Box::new(error))
    }
}

impl From<std::io::Error> for CaregateError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<serde_json::Error> for CaregateError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization { source: error, context: "JSON serialization failed".to_string() }
    }
}

impl From<config::ConfigError> for CaregateError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<bcrypt::BcryptError> for CaregateError {
    fn from(error: bcrypt::BcryptError) -> Self {
        Self::internal_with_source("Password hashing failed", Box::new(error))
    }
}

impl From<ValidationErrors> for CaregateError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_messages("", &errors, &mut fields);
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .map(|(path, messages)| format!("{}: {}", path, messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        let field = fields.into_iter().next().map(|(path, _)| path);

        Self::Validation { message: format!("Validation failed: {}", message), field }
    }
}

/// Flatten nested validation errors into `(dotted.path, messages)` pairs.
fn collect_field_messages(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut Vec<(String, Vec<String>)>,
) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string())
                    })
                    .collect();
                out.push((path, messages));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_messages(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_messages(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}
