//! Resolved menu endpoint.
//!
//! Hands the caller the ordered feature/link tree for their tenant. Gated
//! and anonymous callers receive an empty array — by design not an error,
//! and served without touching the stores.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::menu::gate::{self, AccessDecision};
use crate::models::MenuLink;
use crate::session::AuthSession;
use crate::state::AppState;

/// One resolved feature in the menu response.
#[derive(Debug, Serialize)]
pub struct ResolvedFeatureResponse {
    pub key: String,
    pub slug: String,
    pub display_name: String,
    pub links: Vec<MenuLink>,
}

/// Menu resolution handler.
async fn school_menu(
    State(state): State<AppState>,
    auth: Option<Extension<AuthSession>>,
) -> AppResult<Json<Vec<ResolvedFeatureResponse>>> {
    let session = auth.map(|Extension(s)| s);

    let AccessDecision::Permitted { tenant_id, .. } = gate::evaluate(session.as_ref()) else {
        state.metrics().gated_requests.inc();
        return Ok(Json(Vec::new()));
    };

    let started = Instant::now();
    let resolved = state.resolver().resolve(tenant_id).await.inspect_err(|_| {
        state.metrics().store_failures.inc();
    })?;
    state
        .metrics()
        .resolve_duration_seconds
        .observe(started.elapsed().as_secs_f64());
    state.metrics().menu_resolutions.inc();

    let body = resolved
        .into_iter()
        .map(|r| ResolvedFeatureResponse {
            key: r.feature.key,
            slug: r.feature.slug,
            display_name: r.feature.display_name,
            links: r.effective_menu_links,
        })
        .collect();

    Ok(Json(body))
}

/// Create the menu router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/school/menu", get(school_menu))
}
