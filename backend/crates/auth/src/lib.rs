//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with user name + password
//! - Server-side sessions referenced by an opaque `session_id` cookie
//! - Per-request identity resolution (`resolve_identity`) feeding the
//!   `Identity` extractor used by downstream crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; plaintext is zeroized and never logged
//! - Session tokens carry 256 bits of OS randomness
//! - Unknown user and wrong password are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthConfigError};
pub use application::sign_in::prepare_sign_in;
pub use domain::entity::identity::Identity;
pub use domain::repository::{SessionRepository, UserRepository};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::with_identity;
pub use presentation::router::{auth_router, auth_router_generic};

#[cfg(any(test, feature = "memory"))]
pub use infra::memory::InMemoryAuthRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
