//! Registration Router
//!
//! Wires the registration endpoints onto an axum router. The login
//! route sits behind the Basic-Auth middleware; sign up is public.

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::post;

use crate::application::config::RegistrationConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, RegistrationAppState};
use crate::presentation::middleware;

/// Build the registration router backed by Postgres.
pub fn registration_router(repo: PgUserRepository, config: RegistrationConfig) -> Router {
    registration_router_generic(repo, config)
}

/// Build the registration router over any repository implementation.
/// Tests plug an in-memory store in here.
pub fn registration_router_generic<R>(repo: R, config: RegistrationConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = RegistrationAppState::new(repo, config);

    let protected = Router::new()
        .route("/api/1.0/login", post(handlers::login::<R>))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_basic_auth::<R>,
        ));

    Router::new()
        .route("/api/1.0/users", post(handlers::create_user::<R>))
        .merge(protected)
        .with_state(state)
}
