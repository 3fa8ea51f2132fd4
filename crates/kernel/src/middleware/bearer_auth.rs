//! Bearer token authentication middleware.
//!
//! Checks Authorization: Bearer <token> headers, verifies the JWT signature,
//! and sets the caller's [`AuthSession`] in request extensions. Token minting
//! lives in the external auth service; this kernel only consumes previously
//! issued credentials.

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::Role;
use crate::session::AuthSession;
use crate::state::AppState;

/// Claims carried by a bearer token.
///
/// `sub` identifies the user; the menu engine itself only needs the tenant
/// and role.
#[derive(Debug, Deserialize)]
pub struct BearerClaims {
    pub sub: String,
    pub tenant_id: Uuid,
    pub role: String,
    pub exp: usize,
}

/// Middleware to authenticate Bearer JWT tokens.
///
/// If a valid token is present, caches and sets the auth session in request
/// extensions. If no token is present, passes through without modification —
/// downstream gating treats the caller as anonymous. An invalid token, or a
/// valid token carrying a role outside the closed set, returns 401.
pub async fn authenticate_bearer_token(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let Some(auth_header) = auth_header else {
        return next.run(request).await;
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return next.run(request).await;
    };

    // Previously validated credentials skip signature verification.
    if let Some(session) = state.sessions().get(token) {
        request.extensions_mut().insert(session);
        return next.run(request).await;
    }

    let claims = match jsonwebtoken::decode::<BearerClaims>(
        token,
        state.jwt_decoding_key(),
        state.jwt_validation(),
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!(error = %e, "invalid bearer token");
            return (
                StatusCode::UNAUTHORIZED,
                [("WWW-Authenticate", "Bearer error=\"invalid_token\"")],
                "Invalid token",
            )
                .into_response();
        }
    };

    // Fail closed on a role outside the closed set.
    let Ok(role) = Role::from_str(&claims.role) else {
        debug!(role = %claims.role, "unknown role in bearer token");
        return (
            StatusCode::UNAUTHORIZED,
            [("WWW-Authenticate", "Bearer error=\"invalid_token\"")],
            "Invalid token",
        )
            .into_response();
    };

    let session = AuthSession {
        tenant_id: claims.tenant_id,
        role,
    };
    state.sessions().remember(token, session);
    request.extensions_mut().insert(session);

    next.run(request).await
}
