//! Application Configuration
//!
//! Configuration for the registration application layer.

/// Registration application configuration
#[derive(Debug, Clone, Default)]
pub struct RegistrationConfig {
    /// Password pepper (optional, application-wide secret mixed into
    /// every hash; must stay constant for stored hashes to verify)
    pub password_pepper: Option<Vec<u8>>,
}

impl RegistrationConfig {
    /// Config with a pepper taken from an environment value
    pub fn with_pepper(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            password_pepper: Some(pepper.into()),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
