//! Registration Error Types
//!
//! This module provides registration-specific error variants that
//! integrate with the unified `kernel::error::AppError` system.

use std::collections::BTreeMap;

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Message shown when a username is already taken
pub const DUPLICATE_USERNAME_MESSAGE: &str = "This name is in use";

/// Registration-specific result type alias
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Registration-specific error variants
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Request validation failed; carries the field -> message map
    #[error("Validation error")]
    ValidationFailed(BTreeMap<String, String>),

    /// Username already exists (service check or DB unique constraint)
    #[error("This name is in use")]
    DuplicateUsername,

    /// Basic credentials missing, unknown, or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated principal has no user record. This cannot happen
    /// unless the store was mutated out from under us, so it is a
    /// fatal inconsistency rather than a 404.
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistrationError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrationError::ValidationFailed(_) | RegistrationError::DuplicateUsername => {
                ErrorKind::BadRequest
            }
            RegistrationError::InvalidCredentials => ErrorKind::Unauthorized,
            RegistrationError::UserNotFound
            | RegistrationError::Database(_)
            | RegistrationError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Field -> message map for the error envelope, when applicable
    pub fn validation_errors(&self) -> Option<BTreeMap<String, String>> {
        match self {
            RegistrationError::ValidationFailed(errors) => Some(errors.clone()),
            RegistrationError::DuplicateUsername => Some(BTreeMap::from([(
                "username".to_string(),
                DUPLICATE_USERNAME_MESSAGE.to_string(),
            )])),
            _ => None,
        }
    }

    /// True when the sqlx error is a PostgreSQL unique-constraint
    /// violation (code 23505). Used as the race backstop for
    /// concurrent signups with the same username.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => {
                db_err.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            RegistrationError::ValidationFailed(_) | RegistrationError::DuplicateUsername => {
                "Validation error".to_string()
            }
            other => other.kind().as_str().to_string(),
        };

        let app_err = AppError::new(self.kind(), message);
        match self.validation_errors() {
            Some(errors) => app_err.with_validation_errors(errors),
            None => app_err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RegistrationError::Database(e) => {
                tracing::error!(error = %e, "Registration database error");
            }
            RegistrationError::Internal(msg) => {
                tracing::error!(message = %msg, "Registration internal error");
            }
            RegistrationError::UserNotFound => {
                tracing::error!("Authenticated user missing from store");
            }
            RegistrationError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Registration error");
            }
        }
    }

    /// Bind this error to the request path it occurred on, ready to be
    /// rendered into the error envelope.
    pub fn at(self, path: impl Into<String>) -> ApiError {
        ApiError {
            path: path.into(),
            error: self,
        }
    }
}

/// A [`RegistrationError`] bound to the request path, renderable as an
/// HTTP response with the standard envelope.
#[derive(Debug)]
pub struct ApiError {
    path: String,
    error: RegistrationError,
}

impl ApiError {
    pub fn error(&self) -> &RegistrationError {
        &self.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.log();
        // 401s carry no WWW-Authenticate header; into_response_at never
        // sets one and nothing is added here.
        self.error.to_app_error().into_response_at(&self.path)
    }
}
