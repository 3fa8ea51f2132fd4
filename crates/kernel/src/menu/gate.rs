//! Access gating for menu resolution.
//!
//! A cheap pre-filter that runs before any store access: only tenant staff
//! roles may trigger the resolver, and everyone else gets an empty result
//! without a single store read. This also keeps the platform-admin menu
//! namespace from ever merging with the tenant-staff one.
//!
//! Per request the flow is `Unauthenticated -> Authenticated{role, tenant}
//! -> Gated | Permitted`, recomputed from scratch every time; nothing is
//! persisted between requests.

use uuid::Uuid;

use crate::models::Role;
use crate::session::AuthSession;

/// Whether a role may see the entitlement-driven menu at all.
pub fn can_view_menu(role: Role) -> bool {
    role.is_tenant_staff()
}

/// Terminal state of the per-request access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Caller gets an empty menu; the stores are never consulted.
    Gated,

    /// Resolution may proceed for this tenant.
    Permitted { tenant_id: Uuid, role: Role },
}

/// Evaluate the gate for an optionally-authenticated caller.
///
/// Fails closed: no session (anonymous caller) or a non-staff role both land
/// in [`AccessDecision::Gated`].
pub fn evaluate(session: Option<&AuthSession>) -> AccessDecision {
    match session {
        Some(auth) if can_view_menu(auth.role) => AccessDecision::Permitted {
            tenant_id: auth.tenant_id,
            role: auth.role,
        },
        _ => AccessDecision::Gated,
    }
}
