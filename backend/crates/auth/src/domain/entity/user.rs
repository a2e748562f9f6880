//! User Entity
//!
//! Public user profile. The password hash lives in `Credential`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{Email, UserName, UserPassword};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Immutable, assigned at creation
    pub user_id: UserId,
    /// Unique, used for login
    pub user_name: UserName,
    /// Unique contact address
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(user_name: UserName, email: Email) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            created_at: Utc::now(),
        }
    }
}

/// A user together with the stored password hash, as read for login
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    pub password_hash: UserPassword,
}
