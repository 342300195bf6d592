//! User Entity
//!
//! Identity record persisted on signup. The password is stored only as
//! an Argon2id hash; [`platform::password::HashedPassword`] redacts
//! itself in Debug output so the hash never leaks into logs.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

/// Persisted user record.
///
/// Created on successful signup; never updated or deleted by any
/// operation (fixture teardown aside). `id` is assigned by the
/// database on insert and immutable afterwards.
#[derive(Debug, Clone)]
pub struct User {
    /// Server-assigned identifier (BIGSERIAL)
    pub id: i64,
    /// Unique username, case-sensitive as persisted
    pub username: String,
    /// Display name (not unique)
    pub display_name: String,
    /// Argon2id password hash; never serialized into any response
    pub password_hash: HashedPassword,
    /// Optional image reference/path
    pub image: Option<String>,
    /// Insert timestamp
    pub created_at: DateTime<Utc>,
}

/// Candidate user awaiting its first save.
///
/// Carries the already-hashed password; the cleartext never reaches
/// the domain layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub password_hash: HashedPassword,
    pub image: Option<String>,
}
