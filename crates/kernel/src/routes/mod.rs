//! HTTP route handlers.

pub mod feature;
pub mod health;
pub mod menu;
pub mod metrics;

use axum::Router;

use crate::middleware::authenticate_bearer_token;
use crate::state::AppState;

/// Compose the full application router.
///
/// Bearer authentication runs before every route; handlers read the
/// resulting auth session (if any) from request extensions.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(menu::router())
        .merge(feature::router())
        .merge(health::router())
        .merge(metrics::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate_bearer_token,
        ))
        .with_state(state)
}
