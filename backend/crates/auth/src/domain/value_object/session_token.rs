//! Session Token Value Object
//!
//! 256 bits from the OS RNG, base64url without padding (43 characters).

use platform::crypto::random_token;
use std::fmt;

/// Random bytes per token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Encoded length of a token
pub const SESSION_TOKEN_LENGTH: usize = 43;

/// Opaque bearer token identifying a session
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh token
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_BYTES))
    }

    /// Parse a token presented by a client.
    ///
    /// Anything that could not have been issued by `generate` is rejected
    /// without touching storage.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == SESSION_TOKEN_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}
