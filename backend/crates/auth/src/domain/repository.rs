//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::session::{ResolvedSession, Session};
use crate::domain::entity::user::{Credential, User};
use crate::domain::value_object::{SessionToken, UserName, UserPassword};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user with its password hash.
    ///
    /// Fails with `AuthError::Duplicate` when the user name or email is taken.
    /// Uniqueness is enforced by the store itself, never by a prior lookup.
    async fn create(&self, user: &User, password_hash: &UserPassword) -> AuthResult<()>;

    /// Find user and stored hash by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Credential>>;
}

/// Session store
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Look up a session joined to its owner.
    ///
    /// Expired rows are returned as-is; the caller compares `expires_at`.
    async fn resolve(&self, token: &SessionToken) -> AuthResult<Option<ResolvedSession>>;

    /// Delete a session. Deleting a missing token is not an error.
    async fn delete(&self, token: &SessionToken) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
