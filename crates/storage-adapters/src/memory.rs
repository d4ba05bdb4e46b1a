//! # In-memory catalog
//!
//! A complete `ProjectCatalog` + `TaxonomySource` held in process memory.
//! Used by the `memory` backend mode and by contract tests.
//!
//! Likes keep `likes_count` in step the way the hosted database trigger does,
//! and a duplicate membership insert is rejected like a unique-key violation.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use domains::{
    CatalogError, Category, Profile, Project, ProjectCatalog, ProjectId, ProjectQuery,
    ProjectStatus, Result, TaxonomySource, TechStack, UserId,
};
use uuid::Uuid;

/// Port operations that can be made to fail with [`InMemoryCatalog::fail_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    FetchProjects,
    IsLiked,
    IsBookmarked,
    AddLike,
    RemoveLike,
    AddBookmark,
    RemoveBookmark,
    ListCategories,
    ListTechStacks,
}

/// Input for [`InMemoryCatalog::submit`].
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub project_url: String,
    pub screenshot_url: Option<String>,
    pub status: ProjectStatus,
    pub owner: UserId,
    pub profile: Option<Profile>,
    pub categories: Vec<String>,
    pub tech_stacks: Vec<String>,
}

impl NewProject {
    pub fn new(title: impl Into<String>, owner: UserId) -> Self {
        let title = title.into();
        Self {
            project_url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
            title,
            description: String::new(),
            timeline: String::new(),
            screenshot_url: None,
            status: ProjectStatus::Approved,
            owner,
            profile: None,
            categories: Vec::new(),
            tech_stacks: Vec::new(),
        }
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

type Edge = (ProjectId, UserId);

#[derive(Default)]
pub struct InMemoryCatalog {
    /// Project rows with their insertion sequence, used to break timestamp ties.
    projects: DashMap<ProjectId, (u64, Project)>,
    likes: DashSet<Edge>,
    bookmarks: DashSet<Edge>,
    categories: DashMap<String, Category>,
    tech_stacks: DashMap<String, TechStack>,
    failures: DashMap<CatalogOp, CatalogError>,
    sequence: AtomicU64,
    requests: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a project row as-is, replacing any row with the same id.
    pub fn insert_project(&self, project: Project) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        self.projects.insert(project.id.clone(), (seq, project));
    }

    /// Creates a project the way the submission flow would.
    pub fn submit(&self, draft: NewProject) -> Project {
        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(Uuid::new_v4().to_string()),
            title: draft.title,
            description: draft.description,
            timeline: draft.timeline,
            project_url: draft.project_url,
            screenshot_url: draft.screenshot_url,
            status: draft.status,
            likes_count: 0,
            user_id: draft.owner,
            created_at: now,
            updated_at: now,
            categories: draft.categories,
            tech_stacks: draft.tech_stacks,
            owner: draft.profile,
        };
        self.insert_project(project.clone());
        project
    }

    pub fn insert_category(&self, name: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.categories.insert(name.to_string(), category.clone());
        category
    }

    pub fn insert_tech_stack(&self, name: &str) -> TechStack {
        let stack = TechStack {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.tech_stacks.insert(name.to_string(), stack.clone());
        stack
    }

    /// Makes the next call of `op` fail with `err`. One-shot.
    pub fn fail_next(&self, op: CatalogOp, err: CatalogError) {
        self.failures.insert(op, err);
    }

    /// Number of port calls served so far, failed ones included.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Server-side like counter, bypassing any client mirror.
    pub fn likes_count(&self, id: &ProjectId) -> Option<u32> {
        self.projects.get(id).map(|entry| entry.1.likes_count)
    }

    fn enter(&self, op: CatalogOp) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.failures.remove(&op) {
            Some((_, err)) => {
                tracing::debug!(?op, error = %err, "failing call on request");
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn require_project(&self, id: &ProjectId) -> Result<()> {
        if self.projects.contains_key(id) {
            Ok(())
        } else {
            Err(CatalogError::NotFound {
                entity: "project",
                id: id.to_string(),
            })
        }
    }

    fn bump_likes(&self, id: &ProjectId, liked: bool) {
        if let Some(mut entry) = self.projects.get_mut(id) {
            let project = &mut entry.1;
            project.adjust_likes(liked);
            project.updated_at = Utc::now();
        }
    }

    fn select(&self, keep: impl Fn(&Project) -> bool) -> Vec<Project> {
        let mut rows: Vec<(DateTime<Utc>, u64, Project)> = self
            .projects
            .iter()
            .filter(|entry| keep(&entry.1))
            .map(|entry| (entry.1.created_at, entry.0, entry.1.clone()))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        rows.into_iter().map(|(_, _, p)| p).collect()
    }
}

fn edge(project: &ProjectId, user: &UserId) -> Edge {
    (project.clone(), user.clone())
}

fn duplicate(table: &str) -> CatalogError {
    CatalogError::Unknown(format!(
        "duplicate key value violates unique constraint \"{table}_pkey\""
    ))
}

#[async_trait]
impl ProjectCatalog for InMemoryCatalog {
    async fn fetch_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        self.enter(CatalogOp::FetchProjects)?;
        let rows = match query {
            ProjectQuery::Approved => self.select(|p| p.status == ProjectStatus::Approved),
            ProjectQuery::OwnedBy(user) => self.select(|p| &p.user_id == user),
            ProjectQuery::BookmarkedBy(user) => self.select(|p| {
                p.status == ProjectStatus::Approved && self.bookmarks.contains(&edge(&p.id, user))
            }),
        };
        tracing::debug!(scope = %query.scope(), count = rows.len(), "served listing");
        Ok(rows)
    }

    async fn is_liked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.enter(CatalogOp::IsLiked)?;
        Ok(self.likes.contains(&edge(project, user)))
    }

    async fn add_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.enter(CatalogOp::AddLike)?;
        self.require_project(project)?;
        if !self.likes.insert(edge(project, user)) {
            return Err(duplicate("project_likes"));
        }
        self.bump_likes(project, true);
        Ok(())
    }

    async fn remove_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.enter(CatalogOp::RemoveLike)?;
        if self.likes.remove(&edge(project, user)).is_some() {
            self.bump_likes(project, false);
        }
        Ok(())
    }

    async fn is_bookmarked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.enter(CatalogOp::IsBookmarked)?;
        Ok(self.bookmarks.contains(&edge(project, user)))
    }

    async fn add_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.enter(CatalogOp::AddBookmark)?;
        self.require_project(project)?;
        if !self.bookmarks.insert(edge(project, user)) {
            return Err(duplicate("project_bookmarks"));
        }
        Ok(())
    }

    async fn remove_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.enter(CatalogOp::RemoveBookmark)?;
        self.bookmarks.remove(&edge(project, user));
        Ok(())
    }
}

#[async_trait]
impl TaxonomySource for InMemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.enter(CatalogOp::ListCategories)?;
        let mut rows: Vec<Category> = self.categories.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_tech_stacks(&self) -> Result<Vec<TechStack>> {
        self.enter(CatalogOp::ListTechStacks)?;
        let mut rows: Vec<TechStack> = self.tech_stacks.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_like_edges_drive_counter() {
        let catalog = InMemoryCatalog::new();
        let p = catalog.submit(NewProject::new("Ferris", UserId::new("owner")));
        let u = UserId::new("u1");

        catalog.add_like(&p.id, &u).await.unwrap();
        assert_eq!(catalog.likes_count(&p.id), Some(1));
        assert!(catalog.is_liked(&p.id, &u).await.unwrap());

        let err = catalog.add_like(&p.id, &u).await.unwrap_err();
        assert!(err.to_string().contains("project_likes_pkey"));
        assert_eq!(catalog.likes_count(&p.id), Some(1));

        catalog.remove_like(&p.id, &u).await.unwrap();
        catalog.remove_like(&p.id, &u).await.unwrap();
        assert_eq!(catalog.likes_count(&p.id), Some(0));
    }

    #[tokio::test]
    async fn test_newest_first_with_ties() {
        let catalog = InMemoryCatalog::new();
        let owner = UserId::new("owner");
        let first = catalog.submit(NewProject::new("First", owner.clone()));
        let second = catalog.submit(NewProject::new("Second", owner.clone()));
        catalog.submit(NewProject::new("Hidden", owner).status(ProjectStatus::Rejected));

        let rows = catalog
            .fetch_projects(&ProjectQuery::Approved)
            .await
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let catalog = InMemoryCatalog::new();
        catalog.fail_next(CatalogOp::ListCategories, CatalogError::Network("offline".into()));

        assert!(catalog.list_categories().await.is_err());
        assert!(catalog.list_categories().await.is_ok());
        assert_eq!(catalog.requests(), 2);
    }

    #[tokio::test]
    async fn test_like_unknown_project() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .add_like(&ProjectId::new("missing"), &UserId::new("u1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), domains::ErrorKind::NotFound);
    }
}
