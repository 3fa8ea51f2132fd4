//! Catalog integrity checks.
//!
//! Duplicate slugs across the catalog and duplicate hrefs within one menu
//! list are data-integrity errors: fatal at catalog load, surfaced to the
//! platform operator, never silently repaired.

use std::collections::HashMap;
use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Feature, MenuLink};

/// A violated catalog invariant.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("duplicate slug {slug:?} shared by features {first_key:?} and {second_key:?}")]
    DuplicateSlug {
        slug: String,
        first_key: String,
        second_key: String,
    },

    #[error("duplicate href {href:?} in menu links of {owner:?}")]
    DuplicateHref { owner: String, href: String },
}

/// Verify that a single menu-link list carries no duplicate hrefs.
///
/// `owner` names the list in the error (a feature key, or the feature id for
/// a tenant override).
pub fn verify_links(owner: &str, links: &[MenuLink]) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    for link in links {
        if !seen.insert(link.href.as_str()) {
            return Err(IntegrityError::DuplicateHref {
                owner: owner.to_string(),
                href: link.href.clone(),
            });
        }
    }
    Ok(())
}

/// Verify the full active catalog: slug uniqueness across features and href
/// uniqueness within every default link list.
pub fn verify_catalog(features: &[Feature]) -> Result<(), IntegrityError> {
    let mut by_slug: HashMap<&str, &str> = HashMap::new();
    for feature in features {
        if let Some(first_key) = by_slug.insert(&feature.slug, &feature.key) {
            return Err(IntegrityError::DuplicateSlug {
                slug: feature.slug.clone(),
                first_key: first_key.to_string(),
                second_key: feature.key.clone(),
            });
        }
        verify_links(&feature.key, &feature.default_menu_links)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn feature(key: &str, slug: &str, links: Vec<MenuLink>) -> Feature {
        Feature {
            id: Uuid::now_v7(),
            key: key.to_string(),
            slug: slug.to_string(),
            display_name: key.to_string(),
            description: String::new(),
            default_menu_links: links,
            created: 0,
            changed: 0,
        }
    }

    fn link(href: &str) -> MenuLink {
        MenuLink {
            name: href.to_string(),
            href: href.to_string(),
            icon: "circle".to_string(),
            enabled: true,
        }
    }

    #[test]
    fn clean_catalog_passes() {
        let catalog = vec![
            feature("staff-management", "staff-management", vec![link("/a"), link("/b")]),
            feature("timetable", "timetable", vec![link("/a")]),
        ];
        assert!(verify_catalog(&catalog).is_ok());
    }

    #[test]
    fn duplicate_slug_is_fatal() {
        let catalog = vec![
            feature("staff management", "staff-management", vec![]),
            feature("staff-management", "staff-management", vec![]),
        ];
        let err = verify_catalog(&catalog).unwrap_err();
        assert!(matches!(err, IntegrityError::DuplicateSlug { .. }));
    }

    #[test]
    fn duplicate_href_within_one_list_is_fatal() {
        let links = vec![link("/x"), link("/y"), link("/x")];
        let err = verify_links("staff-management", &links).unwrap_err();
        assert!(matches!(err, IntegrityError::DuplicateHref { .. }));
    }

    #[test]
    fn same_href_across_features_is_allowed() {
        let catalog = vec![
            feature("staff-management", "staff-management", vec![link("/shared")]),
            feature("timetable", "timetable", vec![link("/shared")]),
        ];
        assert!(verify_catalog(&catalog).is_ok());
    }
}
