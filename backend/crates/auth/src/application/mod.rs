//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod register;
pub mod resolve_session;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use config::{AuthConfig, AuthConfigError};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase, prepare_sign_in};
pub use sign_out::SignOutUseCase;
