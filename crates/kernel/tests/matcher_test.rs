#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for route matching against a resolved menu.

use uuid::Uuid;

use campus_kernel::menu::{MatchResult, MenuResolver, ResolvedFeature, match_page};
use campus_test_utils::{TestStores, disabled_link, feature, link};

/// Resolve a tenant with the Scenario A staff-management feature:
/// an enabled "List" link and a disabled "Archive" link, no override.
async fn staff_menu() -> Vec<ResolvedFeature> {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(
        tenant,
        feature("staff-management", "Staff Management")
            .with_link(link("List", "/school/features/staff/list"))
            .with_link(disabled_link("Archive", "/school/features/staff/archive"))
            .build(),
    );

    MenuResolver::new(stores.catalog.clone(), stores.entitlements.clone())
        .resolve(tenant)
        .await
        .unwrap()
}

#[tokio::test]
async fn matches_a_page_by_trailing_href_segment() {
    let resolved = staff_menu().await;

    match match_page(&resolved, "staff-management", Some("list")) {
        MatchResult::Found { feature, link } => {
            assert_eq!(feature.key, "staff-management");
            assert_eq!(link.href, "/school/features/staff/list");
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn disabled_page_is_reported_as_not_implemented() {
    let resolved = staff_menu().await;

    // "Archive" exists in data but is disabled, so it is not reachable.
    match match_page(&resolved, "staff-management", Some("archive")) {
        MatchResult::PageNotImplemented { feature, page_slug } => {
            assert_eq!(feature.key, "staff-management");
            assert_eq!(page_slug, "archive");
        }
        other => panic!("expected PageNotImplemented, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_feature_slug_is_not_found() {
    let resolved = staff_menu().await;

    assert!(matches!(
        match_page(&resolved, "unknown-feature", Some("list")),
        MatchResult::FeatureNotFound
    ));
}

#[tokio::test]
async fn omitted_page_defaults_to_dashboard() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(
        tenant,
        feature("timetable", "Timetable")
            .with_link(link("Dashboard", "/school/features/timetable/dashboard"))
            .build(),
    );
    let resolved = MenuResolver::new(stores.catalog.clone(), stores.entitlements.clone())
        .resolve(tenant)
        .await
        .unwrap();

    let implicit = match_page(&resolved, "timetable", None);
    let explicit = match_page(&resolved, "timetable", Some("dashboard"));

    for result in [implicit, explicit] {
        match result {
            MatchResult::Found { link, .. } => {
                assert_eq!(link.href, "/school/features/timetable/dashboard");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn slug_matching_is_case_sensitive() {
    let resolved = staff_menu().await;

    assert!(matches!(
        match_page(&resolved, "Staff-Management", Some("list")),
        MatchResult::FeatureNotFound
    ));

    match match_page(&resolved, "staff-management", Some("List")) {
        MatchResult::PageNotImplemented { page_slug, .. } => assert_eq!(page_slug, "List"),
        other => panic!("expected PageNotImplemented, got {other:?}"),
    }
}

#[tokio::test]
async fn override_controls_what_is_matchable() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let feature_id = stores.grant(
        tenant,
        feature("staff-management", "Staff Management")
            .with_link(link("List", "/school/features/staff/list"))
            .build(),
    );
    stores.override_menu(tenant, feature_id, vec![link("Roster", "/school/custom/roster")]);

    let resolved = MenuResolver::new(stores.catalog.clone(), stores.entitlements.clone())
        .resolve(tenant)
        .await
        .unwrap();

    // The default "list" page is gone; only the override's page matches.
    assert!(matches!(
        match_page(&resolved, "staff-management", Some("list")),
        MatchResult::PageNotImplemented { .. }
    ));
    assert!(matches!(
        match_page(&resolved, "staff-management", Some("roster")),
        MatchResult::Found { .. }
    ));
}
