//! Category and tech-stack lookups used to label and filter projects.

use std::sync::Arc;

use domains::{Category, TaxonomySource, TechStack};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    pub categories: Vec<Category>,
    pub tech_stacks: Vec<TechStack>,
}

impl Taxonomy {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn tech_stack_names(&self) -> impl Iterator<Item = &str> {
        self.tech_stacks.iter().map(|t| t.name.as_str())
    }
}

pub struct TaxonomyService {
    source: Arc<dyn TaxonomySource>,
}

impl TaxonomyService {
    pub fn new(source: Arc<dyn TaxonomySource>) -> Self {
        Self { source }
    }

    /// Fetches both tables concurrently. Either failure fails the whole call.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> domains::Result<Taxonomy> {
        let (categories, tech_stacks) =
            tokio::try_join!(self.source.list_categories(), self.source.list_tech_stacks())?;
        tracing::debug!(
            categories = categories.len(),
            tech_stacks = tech_stacks.len(),
            "taxonomy loaded"
        );
        Ok(Taxonomy {
            categories,
            tech_stacks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::{CatalogError, MockTaxonomySource};

    #[tokio::test]
    async fn test_load_collects_both_tables() {
        let mut source = MockTaxonomySource::new();
        source.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: "c1".into(),
                name: "Web".into(),
                created_at: Utc::now(),
            }])
        });
        source.expect_list_tech_stacks().returning(|| Ok(Vec::new()));

        let taxonomy = TaxonomyService::new(Arc::new(source)).load().await.unwrap();
        assert_eq!(taxonomy.category_names().collect::<Vec<_>>(), vec!["Web"]);
        assert!(taxonomy.tech_stacks.is_empty());
    }

    #[tokio::test]
    async fn test_load_fails_if_either_table_fails() {
        let mut source = MockTaxonomySource::new();
        source.expect_list_categories().returning(|| Ok(Vec::new()));
        source
            .expect_list_tech_stacks()
            .returning(|| Err(CatalogError::Network("connection reset".into())));

        let err = TaxonomyService::new(Arc::new(source)).load().await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
