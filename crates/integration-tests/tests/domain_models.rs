mod common;

use common::{project, viewer};
use domains::{ProjectCatalog, ProjectId, ProjectQuery, Scope};
use serde_json::json;
use storage_adapters::InMemoryCatalog;

#[test]
fn project_serializes_with_flat_ids_and_lowercase_status() {
    let value = serde_json::to_value(project(1, 3)).unwrap();

    assert_eq!(value["id"], json!("p1"));
    assert_eq!(value["user_id"], json!("owner"));
    assert_eq!(value["status"], json!("approved"));
    assert_eq!(value["likes_count"], json!(3));
    assert_eq!(value["screenshot_url"], json!(null));
}

#[test]
fn every_scope_resolves_with_a_viewer() {
    let user = viewer();
    for scope in [Scope::All, Scope::Owned, Scope::Bookmarked] {
        let query = scope.resolve(Some(&user)).unwrap();
        assert_eq!(query.scope(), scope);
    }
}

#[test]
fn scope_round_trips_through_display() {
    for scope in [Scope::All, Scope::Owned, Scope::Bookmarked] {
        assert_eq!(scope.to_string().parse::<Scope>().unwrap(), scope);
    }
}

#[test]
fn in_memory_catalog_serves_inserted_rows() {
    let catalog = InMemoryCatalog::new();
    catalog.insert_project(project(7, 0));

    let rows = tokio_test::block_on(catalog.fetch_projects(&ProjectQuery::Approved))
        .unwrap();

    assert_eq!(rows[0].id, ProjectId::new("p7"));
}
