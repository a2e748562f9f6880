//! In-Memory Repository
//!
//! Same contract as `PgAuthRepository`, held in process memory. Uniqueness is
//! checked and the row inserted under one write lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::session::{ResolvedSession, Session};
use crate::domain::entity::user::{Credential, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{SessionToken, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, Credential>,
    sessions: HashMap<String, Session>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    /// Move a session's expiry into the past
    pub async fn expire_session(&self, token: &SessionToken) -> bool {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(token.as_str()) {
            Some(session) => {
                session.expires_at = Utc::now() - chrono::Duration::seconds(1);
                true
            }
            None => false,
        }
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User, password_hash: &UserPassword) -> AuthResult<()> {
        let mut state = self.state.write().await;

        let taken = state.users.values().any(|existing| {
            existing.user.user_name == user.user_name || existing.user.email == user.email
        });
        if taken || state.users.contains_key(&user.user_id) {
            return Err(AuthError::Duplicate);
        }

        state.users.insert(
            user.user_id,
            Credential {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Credential>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|c| &c.user.user_name == user_name)
            .cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&session.user_id) {
            return Err(AuthError::Internal("Session owner does not exist".to_string()));
        }
        if state.sessions.contains_key(session.token.as_str()) {
            return Err(AuthError::Internal("Session token collision".to_string()));
        }

        state
            .sessions
            .insert(session.token.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn resolve(&self, token: &SessionToken) -> AuthResult<Option<ResolvedSession>> {
        let state = self.state.read().await;

        let resolved = state.sessions.get(token.as_str()).and_then(|session| {
            state.users.get(&session.user_id).map(|c| ResolvedSession {
                user: c.user.clone(),
                expires_at: session.expires_at,
            })
        });
        Ok(resolved)
    }

    async fn delete(&self, token: &SessionToken) -> AuthResult<()> {
        self.state.write().await.sessions.remove(token.as_str());
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.is_active_at(now));
        Ok((before - state.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, RawPassword};

    fn user(name: &str, email: &str) -> User {
        User::new(UserName::new(name).unwrap(), Email::new(email).unwrap())
    }

    fn hash() -> UserPassword {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_user_name_or_email() {
        let repo = InMemoryAuthRepository::new();
        let password_hash = hash();

        UserRepository::create(&repo, &user("alice", "a@x.com"), &password_hash)
            .await
            .unwrap();

        let same_name =
            UserRepository::create(&repo, &user("alice", "b@x.com"), &password_hash).await;
        assert!(matches!(same_name, Err(AuthError::Duplicate)));

        let same_email =
            UserRepository::create(&repo, &user("bob", "a@x.com"), &password_hash).await;
        assert!(matches!(same_email, Err(AuthError::Duplicate)));

        let name = UserName::new("bob").unwrap();
        assert!(repo.find_by_user_name(&name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = InMemoryAuthRepository::new();
        let alice = user("alice", "a@x.com");
        UserRepository::create(&repo, &alice, &hash()).await.unwrap();

        let session = Session::new(alice.user_id, chrono::Duration::days(7));
        SessionRepository::create(&repo, &session).await.unwrap();

        let resolved = repo.resolve(&session.token).await.unwrap().unwrap();
        assert_eq!(resolved.user, alice);

        repo.delete(&session.token).await.unwrap();
        repo.delete(&session.token).await.unwrap();
        assert!(repo.resolve(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let repo = InMemoryAuthRepository::new();
        let alice = user("alice", "a@x.com");
        UserRepository::create(&repo, &alice, &hash()).await.unwrap();

        let live = Session::new(alice.user_id, chrono::Duration::days(7));
        let stale = Session::new(alice.user_id, chrono::Duration::days(7));
        SessionRepository::create(&repo, &live).await.unwrap();
        SessionRepository::create(&repo, &stale).await.unwrap();
        assert!(repo.expire_session(&stale.token).await);

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.session_count().await, 1);
        assert!(repo.resolve(&live.token).await.unwrap().is_some());
    }
}
