//! HTTP Handlers
//!
//! Axum handlers for the registration API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{OriginalUri, State};

use crate::application::config::RegistrationConfig;
use crate::application::load_profile::LoadProfileUseCase;
use crate::application::sign_up::SignUpUseCase;
use crate::domain::repository::UserRepository;
use crate::error::{ApiError, RegistrationError};
use crate::presentation::dto::{GenericResponse, SignUpRequest, UserResponse};
use crate::presentation::middleware::AuthenticatedUser;
use crate::presentation::validate::validate_sign_up;

/// Shared state for the registration routes
pub struct RegistrationAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<RegistrationConfig>,
}

impl<R> Clone for RegistrationAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> RegistrationAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: RegistrationConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

/// POST /api/1.0/users
pub async fn create_user<R>(
    State(state): State<RegistrationAppState<R>>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<GenericResponse>, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let path = uri.path().to_string();

    let input = validate_sign_up(request)
        .map_err(|errors| RegistrationError::ValidationFailed(errors).at(&path))?;

    let use_case = SignUpUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config));
    use_case.execute(input).await.map_err(|e| e.at(&path))?;

    Ok(Json(GenericResponse::new("User saved")))
}

/// POST /api/1.0/login
///
/// Reached only behind the Basic-Auth middleware, which inserts the
/// authenticated principal into request extensions.
pub async fn login<R>(
    State(state): State<RegistrationAppState<R>>,
    OriginalUri(uri): OriginalUri,
    axum::Extension(principal): axum::Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let path = uri.path().to_string();

    let use_case = LoadProfileUseCase::new(Arc::clone(&state.repo));
    let user = use_case
        .execute(&principal.username)
        .await
        .map_err(|e| e.at(&path))?;

    Ok(Json(UserResponse::from(user)))
}
