//! Order Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Missing or invalid order fields
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Menu file unreadable or malformed
    #[error("Menu error: {0}")]
    Menu(String),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_) => ErrorKind::BadRequest,
            OrderError::Database(_) | OrderError::Menu(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            OrderError::Validation(_) => "invalid_input",
            _ => "internal_error",
        }
    }

    /// Convert to AppError without leaking server-side detail
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            OrderError::Validation(msg) => msg.clone(),
            _ => "Could not save order".to_string(),
        };
        AppError::new(self.kind(), message).with_reason(self.reason())
    }

    fn log(&self) {
        match self {
            OrderError::Validation(msg) => tracing::debug!(message = %msg, "Order rejected"),
            other => tracing::error!(error = %other, "Order error"),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
