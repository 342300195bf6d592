//! Authenticate Use Case
//!
//! Resolves Basic credentials against stored password hashes. Runs on
//! every login request; there is no session to reuse.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::RegistrationConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{RegistrationError, RegistrationResult};

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<RegistrationConfig>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<RegistrationConfig>) -> Self {
        Self { repo, config }
    }

    /// Verify the username/password pair against the store.
    ///
    /// Unknown username and wrong password both return
    /// `InvalidCredentials`; the caller cannot tell them apart.
    pub async fn execute(&self, username: &str, password: String) -> RegistrationResult<User> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(RegistrationError::InvalidCredentials)?;

        let password = ClearTextPassword::new(password);

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(RegistrationError::InvalidCredentials);
        }

        Ok(user)
    }
}
