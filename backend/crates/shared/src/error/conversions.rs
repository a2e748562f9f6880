//! Error conversions
//!
//! Unique-violation detection for `sqlx` and the HTTP rendering of
//! [`AppError`]. Both are feature-gated.

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// SQLSTATE for `unique_violation`
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// True when the error is a unique constraint violation
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Renders `{"status":"error","reason":...,"message":...}`.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "status": "error",
            "reason": self.reason(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
