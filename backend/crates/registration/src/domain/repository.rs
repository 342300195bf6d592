//! Repository Trait
//!
//! Persistence boundary for user records. Implementation is in the
//! infrastructure layer. The store performs no validation and does not
//! reinterpret persistence failures; callers see them as-is.

use crate::domain::entity::user::{NewUser, User};
use crate::error::RegistrationResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user, returning the row with its assigned id.
    ///
    /// Uniqueness of `username` is guaranteed by the store (unique
    /// constraint); a concurrent duplicate insert surfaces as a
    /// database error, not a silent second row.
    async fn save(&self, user: NewUser) -> RegistrationResult<User>;

    /// Find a user by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> RegistrationResult<Option<User>>;
}
