//! Data models for the feature catalog and tenant entitlements.

pub mod entitlement;
pub mod feature;
pub mod menu_override;
pub mod role;

pub use entitlement::TenantFeatureEntitlement;
pub use feature::{CreateFeature, Feature, MenuLink};
pub use menu_override::TenantMenuOverride;
pub use role::{Role, UnknownRole};
