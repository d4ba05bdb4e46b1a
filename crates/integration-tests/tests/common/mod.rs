//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use domains::{
    Project, ProjectCatalog, ProjectId, ProjectQuery, ProjectStatus, Result, UserId,
};
use storage_adapters::InMemoryCatalog;
use tokio::sync::Notify;

pub fn viewer() -> UserId {
    UserId::new("u1")
}

/// An approved project whose `created_at` grows with `n`, so listings are
/// newest-first by `n`.
pub fn project(n: u32, likes: u32) -> Project {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i64::from(n));
    Project {
        id: ProjectId::new(format!("p{n}")),
        title: format!("Project {n}"),
        description: format!("Description {n}"),
        timeline: "1 month".to_string(),
        project_url: format!("https://example.com/p{n}"),
        screenshot_url: None,
        status: ProjectStatus::Approved,
        likes_count: likes,
        user_id: UserId::new("owner"),
        created_at: created,
        updated_at: created,
        categories: vec!["Web".to_string()],
        tech_stacks: vec!["Rust".to_string()],
        owner: None,
    }
}

pub fn owned_by(mut p: Project, user: &UserId, status: ProjectStatus) -> Project {
    p.user_id = user.clone();
    p.status = status;
    p
}

/// In-memory catalog pre-filled with `count` approved projects p1..=pN.
pub fn seeded_catalog(count: u32) -> Arc<InMemoryCatalog> {
    let catalog = Arc::new(InMemoryCatalog::new());
    for n in 1..=count {
        catalog.insert_project(project(n, 0));
    }
    catalog
}

/// Wraps an in-memory catalog and holds approved-scope fetches until
/// [`GatedCatalog::open`] is called.
pub struct GatedCatalog {
    pub inner: Arc<InMemoryCatalog>,
    gate: Notify,
}

impl GatedCatalog {
    pub fn new(inner: Arc<InMemoryCatalog>) -> Self {
        Self {
            inner,
            gate: Notify::new(),
        }
    }

    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ProjectCatalog for GatedCatalog {
    async fn fetch_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        if matches!(query, ProjectQuery::Approved) {
            self.gate.notified().await;
        }
        self.inner.fetch_projects(query).await
    }

    async fn is_liked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.inner.is_liked(project, user).await
    }

    async fn add_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.inner.add_like(project, user).await
    }

    async fn remove_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.inner.remove_like(project, user).await
    }

    async fn is_bookmarked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.inner.is_bookmarked(project, user).await
    }

    async fn add_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.inner.add_bookmark(project, user).await
    }

    async fn remove_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.inner.remove_bookmark(project, user).await
    }
}
