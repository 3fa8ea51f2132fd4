#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for per-tenant menu resolution.

use uuid::Uuid;

use campus_kernel::menu::MenuResolver;
use campus_kernel::models::MenuLink;
use campus_test_utils::{TestStores, disabled_link, feature, link};

fn resolver(stores: &TestStores) -> MenuResolver {
    MenuResolver::new(stores.catalog.clone(), stores.entitlements.clone())
}

/// Feature with an enabled and a disabled default link, no override.
fn staff_management() -> campus_kernel::models::Feature {
    feature("staff-management", "Staff Management")
        .with_link(link("List", "/school/features/staff/list"))
        .with_link(disabled_link("Archive", "/school/features/staff/archive"))
        .build()
}

#[tokio::test]
async fn defaults_are_filtered_to_enabled_links() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(tenant, staff_management());

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].feature.key, "staff-management");
    let names: Vec<&str> = resolved[0]
        .effective_menu_links
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["List"]);
}

#[tokio::test]
async fn override_fully_replaces_defaults() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let feature_id = stores.grant(tenant, staff_management());
    stores.override_menu(tenant, feature_id, vec![link("Custom List", "/x/a")]);

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    assert_eq!(resolved.len(), 1);
    let links = &resolved[0].effective_menu_links;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].name, "Custom List");
    assert_eq!(links[0].href, "/x/a");
    // Nothing from the defaults leaks through; replacement is not a merge.
    assert!(links.iter().all(|l| l.name != "List" && l.name != "Archive"));
}

#[tokio::test]
async fn override_links_are_enabled_filtered_too() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let feature_id = stores.grant(tenant, staff_management());
    stores.override_menu(
        tenant,
        feature_id,
        vec![
            link("Visible", "/x/a"),
            disabled_link("Hidden", "/x/b"),
        ],
    );

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    let names: Vec<&str> = resolved[0]
        .effective_menu_links
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Visible"]);
}

#[tokio::test]
async fn disabled_entitlement_hides_the_feature() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let feature_id = stores.grant(tenant, staff_management());
    stores.entitlements.set_enabled(tenant, feature_id, false);

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    assert!(resolved.is_empty());
}

#[tokio::test]
async fn stale_entitlement_is_skipped_silently() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let gone = stores.grant(tenant, feature("timetable", "Timetable").build());
    stores.grant(tenant, staff_management());
    stores.catalog.remove(gone);

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    // The surviving feature still resolves; the stale row is not an error.
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].feature.key, "staff-management");
}

#[tokio::test]
async fn unknown_tenant_yields_empty_list() {
    let stores = TestStores::new();
    stores.grant(Uuid::now_v7(), staff_management());

    let resolved = resolver(&stores).resolve(Uuid::now_v7()).await.unwrap();

    assert!(resolved.is_empty());
}

#[tokio::test]
async fn feature_with_no_effective_links_is_still_listed() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(
        tenant,
        feature("fees", "Fees")
            .with_link(disabled_link("Invoices", "/school/features/fees/invoices"))
            .build(),
    );

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].effective_menu_links.is_empty());
}

#[tokio::test]
async fn output_is_ordered_by_feature_key() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(tenant, feature("timetable", "Timetable").build());
    stores.grant(tenant, feature("admissions", "Admissions").build());
    stores.grant(tenant, staff_management());

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    let keys: Vec<&str> = resolved.iter().map(|r| r.feature.key.as_str()).collect();
    assert_eq!(keys, vec!["admissions", "staff-management", "timetable"]);
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    let feature_id = stores.grant(tenant, staff_management());
    stores.grant(tenant, feature("timetable", "Timetable").build());
    stores.override_menu(tenant, feature_id, vec![link("Custom", "/x/a")]);

    let resolver = resolver(&stores);
    let first = resolver.resolve(tenant).await.unwrap();
    let second = resolver.resolve(tenant).await.unwrap();

    let shape = |resolved: &[campus_kernel::menu::ResolvedFeature]| -> Vec<(String, Vec<MenuLink>)> {
        resolved
            .iter()
            .map(|r| (r.feature.key.clone(), r.effective_menu_links.clone()))
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));
}

#[tokio::test]
async fn order_within_a_link_list_is_preserved() {
    let stores = TestStores::new();
    let tenant = Uuid::now_v7();
    stores.grant(
        tenant,
        feature("library", "Library")
            .with_link(link("Zebra", "/school/features/library/zebra"))
            .with_link(link("Apple", "/school/features/library/apple"))
            .with_link(link("Mango", "/school/features/library/mango"))
            .build(),
    );

    let resolved = resolver(&stores).resolve(tenant).await.unwrap();

    // Insertion order, not alphabetical.
    let names: Vec<&str> = resolved[0]
        .effective_menu_links
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
}
