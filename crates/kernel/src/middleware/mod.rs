//! HTTP middleware.

mod bearer_auth;

pub use bearer_auth::{BearerClaims, authenticate_bearer_token};
