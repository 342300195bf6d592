//! Infrastructure Layer
//!
//! Postgres-backed repository implementation.

pub mod postgres;

// Re-exports
pub use postgres::PgUserRepository;
