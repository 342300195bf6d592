//! Load Profile Use Case
//!
//! Fetches the authenticated principal's own record. Only called after
//! the Basic-Auth gate has already verified the username exists, so an
//! absent record is a fatal inconsistency (500), never a 404.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{RegistrationError, RegistrationResult};

/// Load profile use case
pub struct LoadProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> LoadProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, username: &str) -> RegistrationResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(RegistrationError::UserNotFound)
    }
}
