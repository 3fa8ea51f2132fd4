//! Route matching against a resolved menu.
//!
//! Maps an incoming `(feature_slug, page_slug)` pair to a specific feature
//! and link. An unmapped page is a first-class result, not an error: the
//! caller renders an "under development" placeholder for it.

use crate::models::{Feature, MenuLink};

use super::resolver::ResolvedFeature;

/// Page slug assumed when a request names only the feature.
pub const DEFAULT_PAGE_SLUG: &str = "dashboard";

/// Outcome of matching a request path against a resolved menu.
#[derive(Debug, Clone)]
pub enum MatchResult {
    /// The page maps to a link in the feature's effective menu.
    Found { feature: Feature, link: MenuLink },

    /// No resolved feature carries the requested slug.
    FeatureNotFound,

    /// The feature matched but none of its effective links ends in the
    /// requested page slug.
    PageNotImplemented { feature: Feature, page_slug: String },
}

/// Match `(feature_slug, page_slug)` against a resolved menu.
///
/// Slug comparison is case-sensitive; slugs are stored on catalog rows at
/// creation time, so the same derivation applies on both sides. Only links
/// in the effective (enabled-filtered) menu participate: a disabled link is
/// not reachable even though it exists in data.
pub fn match_page(
    resolved: &[ResolvedFeature],
    feature_slug: &str,
    page_slug: Option<&str>,
) -> MatchResult {
    let page = page_slug.unwrap_or(DEFAULT_PAGE_SLUG);

    let Some(entry) = resolved.iter().find(|r| r.feature.slug == feature_slug) else {
        return MatchResult::FeatureNotFound;
    };

    match entry
        .effective_menu_links
        .iter()
        .find(|link| last_segment(&link.href) == page)
    {
        Some(link) => MatchResult::Found {
            feature: entry.feature.clone(),
            link: link.clone(),
        },
        None => MatchResult::PageNotImplemented {
            feature: entry.feature.clone(),
            page_slug: page.to_string(),
        },
    }
}

/// The trailing path segment of an href, ignoring a trailing slash.
fn last_segment(href: &str) -> &str {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn last_segment_of_nested_path() {
        assert_eq!(last_segment("/school/features/staff/list"), "list");
    }

    #[test]
    fn last_segment_ignores_trailing_slash() {
        assert_eq!(last_segment("/school/features/staff/list/"), "list");
    }

    #[test]
    fn last_segment_of_root() {
        assert_eq!(last_segment("/"), "");
    }
}
