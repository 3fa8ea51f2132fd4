//! Campus test utilities.
//!
//! Helpers for integration testing: fixture builders for catalog features,
//! menu links, and pre-wired in-memory stores.

use std::sync::Arc;

use uuid::Uuid;

use campus_kernel::models::{Feature, MenuLink, TenantMenuOverride};
use campus_kernel::slug::slugify;
use campus_kernel::store::{MemoryCatalogStore, MemoryEntitlementStore};

/// Create an enabled menu link.
pub fn link(name: &str, href: &str) -> MenuLink {
    MenuLink {
        name: name.to_string(),
        href: href.to_string(),
        icon: "circle".to_string(),
        enabled: true,
    }
}

/// Create a disabled menu link (present in data, suppressed from display).
pub fn disabled_link(name: &str, href: &str) -> MenuLink {
    MenuLink {
        enabled: false,
        ..link(name, href)
    }
}

/// Start building a catalog feature fixture.
pub fn feature(key: &str, display_name: &str) -> FeatureBuilder {
    FeatureBuilder {
        feature: Feature {
            id: Uuid::now_v7(),
            key: key.to_string(),
            slug: slugify(key),
            display_name: display_name.to_string(),
            description: String::new(),
            default_menu_links: Vec::new(),
            created: 0,
            changed: 0,
        },
    }
}

/// Builder for [`Feature`] fixtures.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Set a fixed ID instead of a generated one.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.feature.id = id;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.feature.description = description.to_string();
        self
    }

    /// Append a default menu link.
    pub fn with_link(mut self, link: MenuLink) -> Self {
        self.feature.default_menu_links.push(link);
        self
    }

    pub fn build(self) -> Feature {
        self.feature
    }
}

/// An in-memory catalog + entitlement store pair with fixture helpers.
pub struct TestStores {
    pub catalog: Arc<MemoryCatalogStore>,
    pub entitlements: Arc<MemoryEntitlementStore>,
}

impl TestStores {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(MemoryCatalogStore::new()),
            entitlements: Arc::new(MemoryEntitlementStore::new()),
        }
    }

    /// Add a feature to the catalog and grant it (enabled) to the tenant.
    pub fn grant(&self, tenant_id: Uuid, feature: Feature) -> Uuid {
        let feature_id = feature.id;
        self.catalog.insert(feature);
        self.entitlements.grant(tenant_id, feature_id);
        feature_id
    }

    /// Replace the tenant's menu for a feature.
    pub fn override_menu(&self, tenant_id: Uuid, feature_id: Uuid, menu_links: Vec<MenuLink>) {
        self.entitlements.set_override(TenantMenuOverride {
            tenant_id,
            feature_id,
            menu_links,
            changed: 0,
        });
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}
