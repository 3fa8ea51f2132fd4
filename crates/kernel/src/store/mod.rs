//! Backing-store abstraction for the entitlement engine.
//!
//! The engine reads two collections: the global feature catalog and the
//! per-tenant entitlement/override rows. Both are behind traits so the
//! resolver takes its collaborators by contract rather than by connection
//! pool; production wires the Postgres implementations, tests wire the
//! in-memory ones.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use memory::{MemoryCatalogStore, MemoryEntitlementStore};
pub use postgres::{PgCatalogStore, PgEntitlementStore};

use crate::models::{Feature, TenantFeatureEntitlement, TenantMenuOverride};

/// Failure to reach or query a backing store.
///
/// Always retryable from the caller's point of view; the engine itself never
/// retries.
#[derive(Debug, Error)]
#[error("store unavailable: {0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wrap an underlying failure, preserving its context chain in the
    /// message.
    pub fn unavailable(err: anyhow::Error) -> Self {
        StoreError(format!("{err:#}"))
    }
}

/// Read access to the global feature catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch a feature by id. `None` means the feature no longer exists.
    async fn get_feature(&self, id: Uuid) -> Result<Option<Feature>, StoreError>;

    /// List the full active catalog.
    async fn list_features(&self) -> Result<Vec<Feature>, StoreError>;
}

/// Read access to a tenant's entitlements and menu overrides.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// List all entitlement rows for a tenant, enabled or not.
    async fn list_entitlements(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<TenantFeatureEntitlement>, StoreError>;

    /// Fetch the menu override for a (tenant, feature) pair, if any.
    async fn get_override(
        &self,
        tenant_id: Uuid,
        feature_id: Uuid,
    ) -> Result<Option<TenantMenuOverride>, StoreError>;
}
