//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{RawPassword, SessionToken, UserName};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Cookie value
    pub session_token: SessionToken,
    pub expires_at: DateTime<Utc>,
    pub user_id: UserId,
}

/// Build the unknown-user hash ahead of the first login so that login
/// takes the same time from the start.
pub async fn prepare_sign_in() -> AuthResult<()> {
    tokio::task::spawn_blocking(RawPassword::prepare_verify_against_nothing).await??;
    Ok(())
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Unknown user and wrong password fail with the same error after the
    /// same amount of hashing work.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let credential = match UserName::new(input.user_name) {
            Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let config = Arc::clone(&self.config);
        let Some(credential) = credential else {
            tokio::task::spawn_blocking(move || {
                raw_password.verify_against_nothing(config.pepper())
            })
            .await?;
            return Err(AuthError::InvalidCredentials);
        };

        let password_hash = credential.password_hash.clone();
        let password_valid = tokio::task::spawn_blocking(move || {
            password_hash.verify(&raw_password, config.pepper())
        })
        .await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Session TTL out of range: {e}")))?;
        let session = Session::new(credential.user.user_id, ttl);

        self.session_repo.create(&session).await?;

        tracing::info!(
            user_id = %credential.user.user_id,
            expires_at = %session.expires_at,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: session.token,
            expires_at: session.expires_at,
            user_id: credential.user.user_id,
        })
    }
}
