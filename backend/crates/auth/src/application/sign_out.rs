//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::domain::value_object::SessionToken;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Delete the session. Unknown tokens are ignored.
    pub async fn execute(&self, token: &SessionToken) -> AuthResult<()> {
        self.session_repo.delete(token).await?;

        tracing::info!("User signed out");
        Ok(())
    }
}
