//! Feature catalog model.
//!
//! Features are platform-owned catalog entries. Each ships a default menu;
//! tenants never modify catalog rows directly (they attach overrides, see
//! [`super::menu_override`]). The slug is computed once at creation time and
//! stored on the row, so later edits to the display key cannot break
//! externally bookmarked URLs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::integrity;
use crate::slug::slugify;

/// A single navigation link within a feature's menu.
///
/// `enabled = false` means the link is present in data but suppressed from
/// display; that is distinct from the link being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    /// Display label.
    pub name: String,

    /// Absolute app path (e.g. `/school/features/staff/list`).
    pub href: String,

    /// Opaque symbolic icon reference for the client to interpret.
    pub icon: String,

    /// Whether the link is shown.
    pub enabled: bool,
}

/// Global catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Stable machine key (unique, lowercase-with-separators).
    pub key: String,

    /// URL slug derived from `key` at creation time. Immutable thereafter.
    pub slug: String,

    /// Human-readable name.
    pub display_name: String,

    /// Short description shown in the platform admin catalog.
    pub description: String,

    /// Default menu links, in display order.
    pub default_menu_links: Vec<MenuLink>,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp when last changed.
    pub changed: i64,
}

/// Database row shape; menu links live in a JSONB column.
#[derive(Debug, sqlx::FromRow)]
struct FeatureRow {
    id: Uuid,
    key: String,
    slug: String,
    display_name: String,
    description: String,
    default_menu_links: Json<Vec<MenuLink>>,
    created: i64,
    changed: i64,
}

impl From<FeatureRow> for Feature {
    fn from(row: FeatureRow) -> Self {
        Feature {
            id: row.id,
            key: row.key,
            slug: row.slug,
            display_name: row.display_name,
            description: row.description,
            default_menu_links: row.default_menu_links.0,
            created: row.created,
            changed: row.changed,
        }
    }
}

/// Input for creating a catalog feature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeature {
    pub key: String,
    pub display_name: String,
    pub description: Option<String>,
    pub default_menu_links: Vec<MenuLink>,
}

impl Feature {
    /// Create a new catalog feature.
    ///
    /// The slug is derived from the key here, once, and never rederived.
    /// Fails on duplicate hrefs within the default links; slug uniqueness is
    /// enforced by the database constraint.
    pub async fn create(pool: &PgPool, input: CreateFeature) -> Result<Self> {
        integrity::verify_links(&input.key, &input.default_menu_links)?;

        let id = Uuid::now_v7();
        let slug = slugify(&input.key);
        let now = chrono::Utc::now().timestamp();
        let description = input.description.unwrap_or_default();

        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            INSERT INTO feature (id, key, slug, display_name, description, default_menu_links, created, changed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, key, slug, display_name, description, default_menu_links, created, changed
            "#,
        )
        .bind(id)
        .bind(&input.key)
        .bind(&slug)
        .bind(&input.display_name)
        .bind(&description)
        .bind(Json(&input.default_menu_links))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
        .context("failed to create feature")?;

        Ok(row.into())
    }

    /// Find a feature by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, FeatureRow>(
            "SELECT id, key, slug, display_name, description, default_menu_links, created, changed \
             FROM feature WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch feature by id")?;

        Ok(row.map(Into::into))
    }

    /// Find a feature by its stable machine key.
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, FeatureRow>(
            "SELECT id, key, slug, display_name, description, default_menu_links, created, changed \
             FROM feature WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(pool)
        .await
        .context("failed to fetch feature by key")?;

        Ok(row.map(Into::into))
    }

    /// List the full catalog, ordered by key.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            "SELECT id, key, slug, display_name, description, default_menu_links, created, changed \
             FROM feature ORDER BY key",
        )
        .fetch_all(pool)
        .await
        .context("failed to list features")?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update the display name, description, and default links of a feature.
    ///
    /// The key and slug are immutable; entitlements referencing the feature
    /// stay valid across display edits.
    pub async fn update_presentation(
        pool: &PgPool,
        id: Uuid,
        display_name: &str,
        description: &str,
        default_menu_links: &[MenuLink],
    ) -> Result<Option<Self>> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        integrity::verify_links(&existing.key, default_menu_links)?;
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            UPDATE feature
            SET display_name = $1, description = $2, default_menu_links = $3, changed = $4
            WHERE id = $5
            RETURNING id, key, slug, display_name, description, default_menu_links, created, changed
            "#,
        )
        .bind(display_name)
        .bind(description)
        .bind(Json(default_menu_links))
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update feature")?;

        Ok(row.map(Into::into))
    }

    /// Remove a feature from the catalog.
    ///
    /// Entitlement rows referencing it are left in place; the resolver treats
    /// them as stale and skips them.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feature WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete feature")?;

        Ok(result.rows_affected() > 0)
    }
}
