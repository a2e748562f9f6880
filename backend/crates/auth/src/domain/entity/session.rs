//! Session Entity
//!
//! Server-side session referenced by the `session_id` cookie.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::SessionToken;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Primary key, also the cookie value
    pub token: SessionToken,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for `user_id` that lives for `ttl`.
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token: SessionToken::generate(),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Result of joining a session row to its owner
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

impl ResolvedSession {
    /// Expiry is exclusive: a session is dead at `expires_at`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
