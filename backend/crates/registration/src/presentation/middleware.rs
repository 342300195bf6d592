//! Basic-Auth Middleware
//!
//! Verifies the `Authorization: Basic` header on every request to the
//! protected routes. Stateless, no sessions and no challenge: failures
//! return a plain 401 body without a `WWW-Authenticate` header so
//! browser clients never see the native credentials dialog.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::basic_auth::extract_basic_credentials;

use crate::application::authenticate::AuthenticateUseCase;
use crate::domain::repository::UserRepository;
use crate::error::RegistrationError;
use crate::presentation::handlers::RegistrationAppState;

/// Principal resolved by the Basic-Auth gate, available to handlers via
/// request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Authenticate the request or reject it with 401.
pub async fn require_basic_auth<R>(
    State(state): State<RegistrationAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let path = req.uri().path().to_string();

    let credentials = extract_basic_credentials(req.headers()).map_err(|_| {
        RegistrationError::InvalidCredentials
            .at(&path)
            .into_response()
    })?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(&credentials.username, credentials.password)
        .await
        .map_err(|e| e.at(&path).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser {
        username: user.username,
    });

    Ok(next.run(req).await)
}
