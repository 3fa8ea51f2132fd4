//! Per-tenant menu resolution.
//!
//! Resolution is stateless, read-only, and idempotent: any number of
//! concurrent resolutions may run against the stores, which provide
//! read-committed snapshots. A resolution either completes fully or returns
//! an error; a caller never observes a half-built list.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use uuid::Uuid;

use crate::models::{Feature, MenuLink};
use crate::store::{CatalogStore, EntitlementStore, StoreError};

/// A feature visible to a tenant, carrying its effective menu.
#[derive(Debug, Clone)]
pub struct ResolvedFeature {
    /// The catalog entry.
    pub feature: Feature,

    /// The overridden-or-default link list, filtered to enabled links, in
    /// original order.
    pub effective_menu_links: Vec<MenuLink>,
}

/// Resolves the effective menu for a tenant from the catalog and entitlement
/// stores.
///
/// Holds no per-request state; stores are injected once at construction.
#[derive(Clone)]
pub struct MenuResolver {
    catalog: Arc<dyn CatalogStore>,
    entitlements: Arc<dyn EntitlementStore>,
}

impl MenuResolver {
    pub fn new(catalog: Arc<dyn CatalogStore>, entitlements: Arc<dyn EntitlementStore>) -> Self {
        Self {
            catalog,
            entitlements,
        }
    }

    /// Resolve the ordered list of features visible to `tenant_id`.
    ///
    /// A feature appears iff an entitlement row exists with `enabled = true`
    /// and the feature still exists in the catalog. An override, when
    /// present, fully replaces the default links; the effective list is then
    /// filtered to enabled links with order preserved. Output is sorted by
    /// feature key so identical data always renders identically.
    ///
    /// An unknown tenant yields an empty list, not an error. A feature whose
    /// effective list is empty is still included.
    pub async fn resolve(&self, tenant_id: Uuid) -> Result<Vec<ResolvedFeature>, StoreError> {
        let entitlements = self.entitlements.list_entitlements(tenant_id).await?;
        let enabled: Vec<_> = entitlements.into_iter().filter(|e| e.enabled).collect();

        // Catalog lookups fan out concurrently across the entitled set.
        let features =
            try_join_all(enabled.iter().map(|e| self.catalog.get_feature(e.feature_id))).await?;

        let mut live: Vec<Feature> = Vec::with_capacity(features.len());
        for (fetched, entitlement) in features.into_iter().zip(&enabled) {
            match fetched {
                Some(feature) => live.push(feature),
                None => {
                    // Stale entitlement: the catalog and entitlement stores
                    // are not transactionally coupled, so a deleted feature
                    // may still be referenced. Skip it.
                    debug!(
                        tenant = %tenant_id,
                        feature_id = %entitlement.feature_id,
                        "skipping entitlement for missing feature"
                    );
                }
            }
        }

        live.sort_by(|a, b| a.key.cmp(&b.key));

        // Override lookups are per-feature; issue them concurrently too.
        let overrides = try_join_all(
            live.iter()
                .map(|f| self.entitlements.get_override(tenant_id, f.id)),
        )
        .await?;

        let resolved = live
            .into_iter()
            .zip(overrides)
            .map(|(feature, override_row)| {
                let source = match override_row {
                    Some(o) => o.menu_links,
                    None => feature.default_menu_links.clone(),
                };
                let effective_menu_links =
                    source.into_iter().filter(|link| link.enabled).collect();
                ResolvedFeature {
                    feature,
                    effective_menu_links,
                }
            })
            .collect();

        Ok(resolved)
    }
}
