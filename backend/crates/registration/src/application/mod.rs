//! Application Layer
//!
//! Use cases and application configuration.

pub mod authenticate;
pub mod config;
pub mod load_profile;
pub mod sign_up;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::RegistrationConfig;
pub use load_profile::LoadProfileUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
