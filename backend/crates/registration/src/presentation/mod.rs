//! Presentation Layer
//!
//! HTTP boundary: DTOs, request validation, handlers, Basic-Auth
//! middleware and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod validate;

// Re-exports
pub use dto::{GenericResponse, SignUpRequest, UserResponse};
pub use middleware::AuthenticatedUser;
pub use router::{registration_router, registration_router_generic};
