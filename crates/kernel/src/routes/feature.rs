//! Feature page routing endpoint.
//!
//! Maps `(feature_slug, page_slug)` from the URL to a resolved menu link.
//! A feature page that exists in the product plan but has no link yet is a
//! first-class "under development" state, answered with 200 and an explicit
//! payload so the client can render a placeholder.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::menu::gate::{self, AccessDecision};
use crate::menu::{MatchResult, match_page};
use crate::models::{Feature, MenuLink};
use crate::session::AuthSession;
use crate::state::AppState;

/// Identifying fields of a feature, embedded in page responses.
#[derive(Debug, Serialize)]
pub struct FeatureSummary {
    pub key: String,
    pub slug: String,
    pub display_name: String,
}

impl From<Feature> for FeatureSummary {
    fn from(feature: Feature) -> Self {
        FeatureSummary {
            key: feature.key,
            slug: feature.slug,
            display_name: feature.display_name,
        }
    }
}

/// Response for a page that maps to a menu link.
#[derive(Debug, Serialize)]
pub struct PageFoundResponse {
    pub status: &'static str,
    pub feature: FeatureSummary,
    pub link: MenuLink,
}

/// Response for a matched feature whose page has no link yet.
#[derive(Debug, Serialize)]
pub struct UnderDevelopmentResponse {
    pub status: &'static str,
    pub feature: FeatureSummary,
    pub page: String,
    pub message: String,
}

/// Handler for `/api/school/features/{feature}` (dashboard page implied).
async fn feature_dashboard(
    State(state): State<AppState>,
    auth: Option<Extension<AuthSession>>,
    Path(feature_slug): Path<String>,
) -> AppResult<Response> {
    locate_page(&state, auth.map(|Extension(s)| s), &feature_slug, None).await
}

/// Handler for `/api/school/features/{feature}/{page}`.
async fn feature_page(
    State(state): State<AppState>,
    auth: Option<Extension<AuthSession>>,
    Path((feature_slug, page_slug)): Path<(String, String)>,
) -> AppResult<Response> {
    locate_page(
        &state,
        auth.map(|Extension(s)| s),
        &feature_slug,
        Some(&page_slug),
    )
    .await
}

/// Gate, resolve, and match a page request.
async fn locate_page(
    state: &AppState,
    session: Option<AuthSession>,
    feature_slug: &str,
    page_slug: Option<&str>,
) -> AppResult<Response> {
    // Gated callers get the same answer as an unknown feature, and the
    // stores are never consulted for them.
    let AccessDecision::Permitted { tenant_id, .. } = gate::evaluate(session.as_ref()) else {
        state.metrics().gated_requests.inc();
        return Err(AppError::NotFound);
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

    match match_page(&resolved, feature_slug, page_slug) {
        MatchResult::Found { feature, link } => Ok(Json(PageFoundResponse {
            status: "ok",
            feature: feature.into(),
            link,
        })
        .into_response()),
        MatchResult::PageNotImplemented { feature, page_slug } => {
            state.metrics().pages_not_implemented.inc();
            let message = format!(
                "The {page_slug:?} page of {} is under development.",
                feature.display_name
            );
            Ok(Json(UnderDevelopmentResponse {
                status: "under_development",
                feature: feature.into(),
                page: page_slug,
                message,
            })
            .into_response())
        }
        MatchResult::FeatureNotFound => Err(AppError::NotFound),
    }
}

/// Create the feature page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/school/features/{feature}", get(feature_dashboard))
        .route("/api/school/features/{feature}/{page}", get(feature_page))
}
