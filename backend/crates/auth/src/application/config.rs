//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::{CookieConfig, is_valid_cookie_name};
use thiserror::Error;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session lifetime (7 days)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum AuthConfigError {
    #[error("Invalid session cookie name: {0:?}")]
    InvalidCookieName(String),
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name, always a valid cookie token
    session_cookie_name: String,
    /// Session lifetime, also used for the cookie expiry
    pub session_ttl: Duration,
    /// Whether to set the Secure cookie attribute
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_id".to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, works over plain HTTP)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Create config for production (Secure cookie)
    pub fn production() -> Self {
        Self::default()
    }

    /// Pick the profile from the `ENV` value; only `production` is secure
    pub fn for_environment(env: &str) -> Self {
        if env.eq_ignore_ascii_case("production") {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Override the session cookie name. Names that could not appear in a
    /// `Set-Cookie` header are rejected.
    pub fn with_session_cookie_name(
        mut self,
        name: impl Into<String>,
    ) -> Result<Self, AuthConfigError> {
        let name = name.into();
        if !is_valid_cookie_name(&name) {
            return Err(AuthConfigError::InvalidCookieName(name));
        }
        self.session_cookie_name = name;
        Ok(self)
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    /// Cookie attributes for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
