//! Registration (Signup + Login) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity and repository trait
//! - `application/` - Use cases and application config
//! - `infra/` - PostgreSQL repository implementation
//! - `presentation/` - HTTP handlers, DTOs, validation, router
//!
//! ## Features
//! - User signup with aggregate field validation
//! - Duplicate-username rejection backed by a DB unique constraint
//! - Stateless login via HTTP Basic credentials
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or returned in clear
//! - Every login request re-authenticates; no sessions, no cookies
//! - 401 responses omit the `WWW-Authenticate` challenge header

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::RegistrationConfig;
pub use error::{RegistrationError, RegistrationResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::registration_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
