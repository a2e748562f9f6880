//! Resolve Session Use Case
//!
//! Maps a presented session token to the owning user, if the session is live.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::user::User;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::SessionToken;
use crate::error::AuthResult;

/// Resolve session use case
pub struct ResolveSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> ResolveSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// `Ok(None)` for unknown and expired sessions alike. Expired rows are
    /// left in place.
    pub async fn execute(&self, token: &SessionToken) -> AuthResult<Option<User>> {
        let Some(resolved) = self.session_repo.resolve(token).await? else {
            return Ok(None);
        };

        if !resolved.is_active_at(Utc::now()) {
            tracing::debug!(user_id = %resolved.user.user_id, "Session expired");
            return Ok(None);
        }

        Ok(Some(resolved.user))
    }
}
