//! Sign Up Use Case
//!
//! Creates a new user account with a hashed password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::RegistrationConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{RegistrationError, RegistrationResult};

/// Sign up input. Fields are already validated at the HTTP boundary;
/// the duplicate-username check stays here because it needs the store.
#[derive(Debug)]
pub struct SignUpInput {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub image: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<RegistrationConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<RegistrationConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> RegistrationResult<User> {
        // Fast-path duplicate check; the unique constraint below is the
        // authoritative guard.
        if self
            .repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(RegistrationError::DuplicateUsername);
        }

        let password = ClearTextPassword::new(input.password);
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| RegistrationError::Internal(e.to_string()))?;

        let candidate = NewUser {
            username: input.username,
            display_name: input.display_name,
            password_hash,
            image: input.image,
        };

        let user = match self.repo.save(candidate).await {
            Ok(user) => user,
            // A concurrent signup can slip past the check above; the
            // unique constraint turns it into the same duplicate error
            // instead of a second row.
            Err(RegistrationError::Database(e)) if RegistrationError::is_unique_violation(&e) => {
                return Err(RegistrationError::DuplicateUsername);
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            "User signed up"
        );

        Ok(user)
    }
}
