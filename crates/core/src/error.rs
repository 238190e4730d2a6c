//! Error taxonomy shared by the catalog engine and its HTTP surface.
//!
//! Every failure is folded into an [`ErrorEnvelope`] before it leaves the
//! service: a coarse [`ErrorKind`], a user-facing message, optional
//! structured details, and an advisory HTTP status. Raw driver errors never
//! reach the envelope in release builds.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::AuthError;
use crate::movie::StoreError;

/// Coarse failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Unauthorized,
    Dependency,
    Internal,
}

impl ErrorKind {
    /// Advisory HTTP status for this kind. Core never depends on it; the
    /// transport layer applies it when building responses.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Duplicate => 409,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Dependency => 503,
            ErrorKind::Internal => 500,
        }
    }
}

/// Single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collected input validation failures.
///
/// Validation is collected rather than short-circuited: every bad field is
/// reported in a single rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid request parameters")]
pub struct ValidationErrors {
    pub field_errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field rejection.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

/// Failure union for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("no movie matches '{0}'")]
    NotFound(String),

    #[error("slug '{0}' is already taken")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Classified failure in the shape the HTTP surface ships to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
    pub http_status: u16,
}

impl ErrorEnvelope {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Value::Null,
            http_status: kind.http_status(),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

impl From<&CatalogError> for ErrorEnvelope {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => {
                ErrorEnvelope::new(ErrorKind::Validation, "Invalid request parameters")
                    .with_details(json!({ "field_errors": errors.field_errors }))
            }
            CatalogError::NotFound(token) => {
                ErrorEnvelope::new(ErrorKind::NotFound, format!("No movie matches '{}'", token))
            }
            CatalogError::Duplicate(slug) => ErrorEnvelope::new(
                ErrorKind::Duplicate,
                format!("A movie with slug '{}' already exists", slug),
            ),
            CatalogError::Store(store_err) => ErrorEnvelope::from(store_err),
        }
    }
}

impl From<&StoreError> for ErrorEnvelope {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => {
                ErrorEnvelope::new(ErrorKind::NotFound, format!("No movie matches '{}'", what))
            }
            StoreError::Conflict(what) => ErrorEnvelope::new(
                ErrorKind::Duplicate,
                format!("Conflicting record: {}", what),
            ),
            StoreError::Busy(_) => ErrorEnvelope::new(
                ErrorKind::Dependency,
                "Storage is temporarily unavailable, retry shortly",
            ),
            StoreError::Database(detail) => internal_envelope(detail),
        }
    }
}

impl From<&AuthError> for ErrorEnvelope {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => {
                ErrorEnvelope::new(ErrorKind::Unauthorized, "Authentication required")
            }
            AuthError::InvalidCredentials(_) => {
                ErrorEnvelope::new(ErrorKind::Unauthorized, "Invalid credentials")
            }
            AuthError::ServiceUnavailable(_) => ErrorEnvelope::new(
                ErrorKind::Dependency,
                "Authentication service unavailable",
            ),
            AuthError::ConfigurationError(detail) => internal_envelope(detail),
        }
    }
}

/// Internal failures surface a fixed message; the underlying detail rides
/// along only in debug builds.
fn internal_envelope(detail: &str) -> ErrorEnvelope {
    let envelope = ErrorEnvelope::new(ErrorKind::Internal, "Internal error");
    if cfg!(debug_assertions) {
        envelope.with_details(json!({ "detail": detail }))
    } else {
        envelope
    }
}
