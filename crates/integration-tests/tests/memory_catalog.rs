mod common;

use common::{owned_by, project, seeded_catalog, viewer};
use domains::{
    CatalogError, ErrorKind, ProjectCatalog, ProjectId, ProjectQuery, ProjectStatus, UserId,
};
use storage_adapters::{CatalogOp, InMemoryCatalog, NewProject};

fn ids(rows: &[domains::Project]) -> Vec<&str> {
    rows.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn approved_listing_is_newest_first() {
    let catalog = seeded_catalog(3);
    catalog.insert_project(owned_by(project(4, 0), &viewer(), ProjectStatus::Rejected));

    let rows = catalog
        .fetch_projects(&ProjectQuery::Approved)
        .await
        .unwrap();

    assert_eq!(ids(&rows), vec!["p3", "p2", "p1"]);
}

#[tokio::test]
async fn bookmarked_listing_hides_unapproved_rows() {
    let catalog = seeded_catalog(2);
    catalog.insert_project(owned_by(project(3, 0), &UserId::new("x"), ProjectStatus::Pending));
    for id in ["p1", "p3"] {
        catalog.add_bookmark(&ProjectId::new(id), &viewer()).await.unwrap();
    }

    let rows = catalog
        .fetch_projects(&ProjectQuery::BookmarkedBy(viewer()))
        .await
        .unwrap();

    assert_eq!(ids(&rows), vec!["p1"]);
}

#[tokio::test]
async fn owned_listing_filters_by_owner() {
    let catalog = seeded_catalog(2);
    let mine = catalog.submit(NewProject::new("Mine", viewer()).status(ProjectStatus::Pending));

    let rows = catalog
        .fetch_projects(&ProjectQuery::OwnedBy(viewer()))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, mine.id);
    assert_eq!(rows[0].status, ProjectStatus::Pending);
}

#[tokio::test]
async fn duplicate_bookmark_is_rejected() {
    let catalog = seeded_catalog(1);
    let id = ProjectId::new("p1");
    catalog.add_bookmark(&id, &viewer()).await.unwrap();

    let err = catalog.add_bookmark(&id, &viewer()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(catalog.is_bookmarked(&id, &viewer()).await.unwrap());
}

#[tokio::test]
async fn injected_failure_hits_only_its_operation() {
    let catalog = InMemoryCatalog::new();
    catalog.fail_next(CatalogOp::IsBookmarked, CatalogError::Forbidden("nope".into()));
    let id = ProjectId::new("p1");

    assert!(catalog.is_liked(&id, &viewer()).await.is_ok());
    let err = catalog.is_bookmarked(&id, &viewer()).await.unwrap_err();
    assert_eq!(err.to_string(), "forbidden: nope");
    assert!(catalog.is_bookmarked(&id, &viewer()).await.is_ok());
}
