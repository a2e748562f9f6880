//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. `Display` carries the detail for logs;
//! the client only ever sees the reason code and the public message.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Username or email already registered. Which one is not disclosed.
    #[error("Username or email already exists")]
    Duplicate,

    /// Unknown user name or wrong password; both look the same to the client
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No live session attached to the request
    #[error("Not logged in")]
    NotLoggedIn,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (hashing failure, corrupt row, join error)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Duplicate => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::NotLoggedIn => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "invalid_input",
            AuthError::Duplicate => "duplicate",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::NotLoggedIn => "not_logged_in",
            AuthError::Database(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Convert to AppError without leaking server-side detail
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            AuthError::Validation(msg) => msg.clone(),
            AuthError::Database(_) | AuthError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).with_reason(self.reason())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Value-object validation errors. Client errors keep their message.
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
