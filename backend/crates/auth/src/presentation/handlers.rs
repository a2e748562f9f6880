//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{cookie_values, to_header_value};

use crate::application::config::AuthConfig;
use crate::application::{
    RegisterInput, RegisterUseCase, SignInInput, SignInUseCase, SignOutUseCase,
};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::SessionToken;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, MeResponse, RegisterRequest, StatusResponse, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<Json<StatusResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Unreadable register body");
        AuthError::Validation("Missing fields".to_string())
    })?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(StatusResponse::ok()))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
///
/// An unreadable body is treated like empty credentials.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie()
        .build_set_cookie(output.session_token.as_str(), output.expires_at);

    Ok((
        [(header::SET_COOKIE, to_header_value(&cookie))],
        Json(StatusResponse::ok()),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always succeeds; the cookie is cleared even when deletion fails.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = cookie_values(&headers, state.config.session_cookie_name())
        .find_map(SessionToken::parse);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to delete session on logout");
        }
    }

    let cookie = state.config.cookie().build_delete_cookie();

    (
        [(header::SET_COOKIE, to_header_value(&cookie))],
        Json(StatusResponse::ok()),
    )
}

// ============================================================================
// Me
// ============================================================================

/// GET /api/auth/me
pub async fn me(identity: Identity) -> AuthResult<Json<MeResponse>> {
    let user = identity.user().ok_or(AuthError::NotLoggedIn)?;

    Ok(Json(MeResponse {
        status: "ok",
        user: UserResponse::from(user),
    }))
}
