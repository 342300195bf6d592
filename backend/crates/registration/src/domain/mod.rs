//! Domain Layer
//!
//! Contains the user entity and the repository trait.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::user::{NewUser, User};
pub use repository::UserRepository;
