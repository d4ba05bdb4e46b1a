//! # Ports
//!
//! Any backend adapter must implement these traits to be used by the services.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Category, Project, ProjectId, ProjectQuery, TechStack, UserId};

/// Read access to project listings plus the two membership relations.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ProjectCatalog: Send + Sync {
    /// Returns the projects matching `query`, newest first.
    async fn fetch_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>>;

    // Like membership
    async fn is_liked(&self, project: &ProjectId, user: &UserId) -> Result<bool>;
    async fn add_like(&self, project: &ProjectId, user: &UserId) -> Result<()>;
    async fn remove_like(&self, project: &ProjectId, user: &UserId) -> Result<()>;

    // Bookmark membership
    async fn is_bookmarked(&self, project: &ProjectId, user: &UserId) -> Result<bool>;
    async fn add_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()>;
    async fn remove_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()>;
}

/// Lookup tables used to label projects.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>>;
    /// All tech stacks, ordered by name.
    async fn list_tech_stacks(&self) -> Result<Vec<TechStack>>;
}
