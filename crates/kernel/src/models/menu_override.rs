//! Tenant menu override model.
//!
//! At most one override exists per (tenant, feature). When present, its link
//! list fully replaces the feature's default menu for that tenant; it is a
//! replacement, not a patch. Removing the override returns the tenant to the
//! catalog defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::integrity;
use crate::models::MenuLink;

/// Menu override record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantMenuOverride {
    /// Tenant (school) identifier.
    pub tenant_id: Uuid,

    /// Catalog feature whose menu is replaced.
    pub feature_id: Uuid,

    /// Replacement links, in display order.
    pub menu_links: Vec<MenuLink>,

    /// Unix timestamp when last written.
    pub changed: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct OverrideRow {
    tenant_id: Uuid,
    feature_id: Uuid,
    menu_links: Json<Vec<MenuLink>>,
    changed: i64,
}

impl From<OverrideRow> for TenantMenuOverride {
    fn from(row: OverrideRow) -> Self {
        TenantMenuOverride {
            tenant_id: row.tenant_id,
            feature_id: row.feature_id,
            menu_links: row.menu_links.0,
            changed: row.changed,
        }
    }
}

impl TenantMenuOverride {
    /// Set (or fully replace) the override for a (tenant, feature) pair.
    pub async fn set(
        pool: &PgPool,
        tenant_id: Uuid,
        feature_id: Uuid,
        menu_links: &[MenuLink],
    ) -> Result<Self> {
        integrity::verify_links(&feature_id.to_string(), menu_links)?;
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            INSERT INTO tenant_menu_override (tenant_id, feature_id, menu_links, changed)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, feature_id)
                DO UPDATE SET menu_links = $3, changed = $4
            RETURNING tenant_id, feature_id, menu_links, changed
            "#,
        )
        .bind(tenant_id)
        .bind(feature_id)
        .bind(Json(menu_links))
        .bind(now)
        .fetch_one(pool)
        .await
        .context("failed to set menu override")?;

        Ok(row.into())
    }

    /// Find the override for a (tenant, feature) pair.
    pub async fn find(pool: &PgPool, tenant_id: Uuid, feature_id: Uuid) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, OverrideRow>(
            "SELECT tenant_id, feature_id, menu_links, changed \
             FROM tenant_menu_override WHERE tenant_id = $1 AND feature_id = $2",
        )
        .bind(tenant_id)
        .bind(feature_id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch menu override")?;

        Ok(row.map(Into::into))
    }

    /// Remove the override, returning the tenant to the catalog defaults.
    pub async fn clear(pool: &PgPool, tenant_id: Uuid, feature_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM tenant_menu_override WHERE tenant_id = $1 AND feature_id = $2",
        )
        .bind(tenant_id)
        .bind(feature_id)
        .execute(pool)
        .await
        .context("failed to clear menu override")?;

        Ok(result.rows_affected() > 0)
    }
}
