//! Session Resolver Middleware
//!
//! Runs on every request. Attaches an `Identity` to the request extensions
//! and never rejects: any failure leaves the request anonymous.

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use std::sync::Arc;

use platform::cookie::cookie_values;

use crate::application::ResolveSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::SessionToken;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Resolve the session cookie into an `Identity`
pub async fn resolve_identity<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    // Duplicate cookies are common; use the first one that could be a token
    let token = cookie_values(req.headers(), state.config.session_cookie_name())
        .find_map(SessionToken::parse);

    let identity = match token {
        Some(token) => identify(&state, &token).await,
        None => Identity::Anonymous,
    };
    req.extensions_mut().insert(identity);
    next.run(req).await
}

async fn identify<R>(state: &AuthMiddlewareState<R>, token: &SessionToken) -> Identity
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = ResolveSessionUseCase::new(state.repo.clone());
    match use_case.execute(token).await {
        Ok(Some(user)) => Identity::Authenticated(user),
        Ok(None) => Identity::Anonymous,
        Err(e) => {
            tracing::warn!(error = %e, "Session resolution failed; continuing anonymously");
            Identity::Anonymous
        }
    }
}

/// Wrap every route of `router` with `resolve_identity`
pub fn with_identity<R>(router: Router, repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthMiddlewareState { repo, config };
    router.layer(middleware::from_fn_with_state(state, resolve_identity::<R>))
}
