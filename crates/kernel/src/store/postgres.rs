//! PostgreSQL-backed store implementations.
//!
//! Thin adapters over the model layer: each call is a single read, and model
//! errors surface as retryable [`StoreError`]s.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CatalogStore, EntitlementStore, StoreError};
use crate::models::{Feature, TenantFeatureEntitlement, TenantMenuOverride};

/// Catalog reads backed by the `feature` table.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn get_feature(&self, id: Uuid) -> Result<Option<Feature>, StoreError> {
        Feature::find_by_id(&self.pool, id)
            .await
            .map_err(StoreError::unavailable)
    }

    async fn list_features(&self) -> Result<Vec<Feature>, StoreError> {
        Feature::list_all(&self.pool)
            .await
            .map_err(StoreError::unavailable)
    }
}

/// Entitlement and override reads backed by the tenant tables.
#[derive(Clone)]
pub struct PgEntitlementStore {
    pool: PgPool,
}

impl PgEntitlementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementStore for PgEntitlementStore {
    async fn list_entitlements(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<TenantFeatureEntitlement>, StoreError> {
        TenantFeatureEntitlement::list_for_tenant(&self.pool, tenant_id)
            .await
            .map_err(StoreError::unavailable)
    }

    async fn get_override(
        &self,
        tenant_id: Uuid,
        feature_id: Uuid,
    ) -> Result<Option<TenantMenuOverride>, StoreError> {
        TenantMenuOverride::find(&self.pool, tenant_id, feature_id)
            .await
            .map_err(StoreError::unavailable)
    }
}
