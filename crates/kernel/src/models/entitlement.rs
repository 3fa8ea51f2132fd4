//! Tenant feature entitlement model.
//!
//! One row per (tenant, feature) pair records whether the tenant may use the
//! feature. Rows are created when a feature is granted and are never deleted,
//! only disabled, so the grant history survives.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Entitlement record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TenantFeatureEntitlement {
    /// Tenant (school) identifier.
    pub tenant_id: Uuid,

    /// Catalog feature this entitlement refers to.
    pub feature_id: Uuid,

    /// Whether the tenant currently has the feature.
    pub enabled: bool,

    /// Unix timestamp when first granted.
    pub granted: i64,

    /// Unix timestamp when last toggled.
    pub changed: i64,
}

impl TenantFeatureEntitlement {
    /// Grant a feature to a tenant.
    ///
    /// Re-granting an existing pair re-enables it rather than inserting a
    /// second row; uniqueness on (tenant, feature) is an invariant.
    pub async fn grant(pool: &PgPool, tenant_id: Uuid, feature_id: Uuid) -> Result<Self> {
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, TenantFeatureEntitlement>(
            r#"
            INSERT INTO tenant_feature_entitlement (tenant_id, feature_id, enabled, granted, changed)
            VALUES ($1, $2, TRUE, $3, $3)
            ON CONFLICT (tenant_id, feature_id)
                DO UPDATE SET enabled = TRUE, changed = $3
            RETURNING tenant_id, feature_id, enabled, granted, changed
            "#,
        )
        .bind(tenant_id)
        .bind(feature_id)
        .bind(now)
        .fetch_one(pool)
        .await
        .context("failed to grant entitlement")?;

        Ok(row)
    }

    /// Enable or disable an existing entitlement.
    ///
    /// Returns false if no row exists for the pair.
    pub async fn set_enabled(
        pool: &PgPool,
        tenant_id: Uuid,
        feature_id: Uuid,
        enabled: bool,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            "UPDATE tenant_feature_entitlement SET enabled = $1, changed = $2 \
             WHERE tenant_id = $3 AND feature_id = $4",
        )
        .bind(enabled)
        .bind(now)
        .bind(tenant_id)
        .bind(feature_id)
        .execute(pool)
        .await
        .context("failed to toggle entitlement")?;

        Ok(result.rows_affected() > 0)
    }

    /// Find the entitlement for a (tenant, feature) pair.
    pub async fn find(pool: &PgPool, tenant_id: Uuid, feature_id: Uuid) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, TenantFeatureEntitlement>(
            "SELECT tenant_id, feature_id, enabled, granted, changed \
             FROM tenant_feature_entitlement WHERE tenant_id = $1 AND feature_id = $2",
        )
        .bind(tenant_id)
        .bind(feature_id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch entitlement")?;

        Ok(row)
    }

    /// List all entitlement rows for a tenant, enabled or not.
    ///
    /// Ordered by feature id so repeated reads are stable.
    pub async fn list_for_tenant(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, TenantFeatureEntitlement>(
            "SELECT tenant_id, feature_id, enabled, granted, changed \
             FROM tenant_feature_entitlement WHERE tenant_id = $1 ORDER BY feature_id",
        )
        .bind(tenant_id)
        .fetch_all(pool)
        .await
        .context("failed to list entitlements for tenant")?;

        Ok(rows)
    }
}
