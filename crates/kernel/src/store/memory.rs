//! In-memory store implementations.
//!
//! Used by tests and local development. Interior mutability uses
//! `parking_lot::RwLock`: no poisoning, and the critical sections are short
//! enough to hold across the synchronous trait bodies.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{CatalogStore, EntitlementStore, StoreError};
use crate::models::{Feature, TenantFeatureEntitlement, TenantMenuOverride};

/// Catalog held in process memory.
#[derive(Default)]
pub struct MemoryCatalogStore {
    features: RwLock<Vec<Feature>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature to the catalog.
    pub fn insert(&self, feature: Feature) {
        self.features.write().push(feature);
    }

    /// Remove a feature, simulating a catalog deletion that races with
    /// existing entitlements.
    pub fn remove(&self, id: Uuid) {
        self.features.write().retain(|f| f.id != id);
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn get_feature(&self, id: Uuid) -> Result<Option<Feature>, StoreError> {
        Ok(self.features.read().iter().find(|f| f.id == id).cloned())
    }

    async fn list_features(&self) -> Result<Vec<Feature>, StoreError> {
        let mut features = self.features.read().clone();
        features.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(features)
    }
}

/// Entitlements and overrides held in process memory.
#[derive(Default)]
pub struct MemoryEntitlementStore {
    entitlements: RwLock<Vec<TenantFeatureEntitlement>>,
    overrides: RwLock<HashMap<(Uuid, Uuid), TenantMenuOverride>>,
}

impl MemoryEntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a feature to a tenant, or re-enable an existing grant.
    pub fn grant(&self, tenant_id: Uuid, feature_id: Uuid) {
        self.set_enabled(tenant_id, feature_id, true);
    }

    /// Insert or toggle an entitlement row.
    pub fn set_enabled(&self, tenant_id: Uuid, feature_id: Uuid, enabled: bool) {
        let mut rows = self.entitlements.write();
        if let Some(row) = rows
            .iter_mut()
            .find(|e| e.tenant_id == tenant_id && e.feature_id == feature_id)
        {
            row.enabled = enabled;
        } else {
            rows.push(TenantFeatureEntitlement {
                tenant_id,
                feature_id,
                enabled,
                granted: 0,
                changed: 0,
            });
        }
    }

    /// Set (or fully replace) a tenant's menu override for a feature.
    pub fn set_override(&self, override_row: TenantMenuOverride) {
        self.overrides.write().insert(
            (override_row.tenant_id, override_row.feature_id),
            override_row,
        );
    }

    /// Remove an override, returning the tenant to the catalog defaults.
    pub fn clear_override(&self, tenant_id: Uuid, feature_id: Uuid) {
        self.overrides.write().remove(&(tenant_id, feature_id));
    }
}

#[async_trait]
impl EntitlementStore for MemoryEntitlementStore {
    async fn list_entitlements(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<TenantFeatureEntitlement>, StoreError> {
        let mut rows: Vec<_> = self
            .entitlements
            .read()
            .iter()
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.feature_id);
        Ok(rows)
    }

    async fn get_override(
        &self,
        tenant_id: Uuid,
        feature_id: Uuid,
    ) -> Result<Option<TenantMenuOverride>, StoreError> {
        Ok(self.overrides.read().get(&(tenant_id, feature_id)).cloned())
    }
}
