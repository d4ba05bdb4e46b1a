use std::sync::Arc;

use domains::CatalogError;
use services::TaxonomyService;
use storage_adapters::{CatalogOp, InMemoryCatalog};

#[tokio::test]
async fn lookups_are_sorted_by_name() {
    let catalog = Arc::new(InMemoryCatalog::new());
    for name in ["Web", "AI/ML", "Games"] {
        catalog.insert_category(name);
    }
    for name in ["TypeScript", "Go", "Rust"] {
        catalog.insert_tech_stack(name);
    }

    let taxonomy = TaxonomyService::new(catalog).load().await.unwrap();

    assert_eq!(
        taxonomy.category_names().collect::<Vec<_>>(),
        vec!["AI/ML", "Games", "Web"]
    );
    assert_eq!(
        taxonomy.tech_stack_names().collect::<Vec<_>>(),
        vec!["Go", "Rust", "TypeScript"]
    );
}

#[tokio::test]
async fn failure_in_either_table_is_reported() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.insert_category("Web");
    catalog.fail_next(CatalogOp::ListCategories, CatalogError::Network("offline".into()));

    let err = TaxonomyService::new(catalog).load().await.unwrap_err();

    assert_eq!(err, CatalogError::Network("offline".into()));
}
