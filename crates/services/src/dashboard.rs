//! # Dashboard
//!
//! The viewer's control panel: the public feed, their own submissions, and
//! their saved projects, each backed by its own [`ListingStore`].
//!
//! A toggle runs against one store and, once the backend confirms it, the
//! same change is reconciled locally into the other stores loaded for the
//! same viewer.

use std::sync::Arc;

use domains::{CatalogError, Project, ProjectCatalog, ProjectId, ProjectStatus, Scope, UserId};

use crate::listing_store::{ListingStore, LoadOutcome, ToggleOutcome};

/// Aggregate numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub submitted: usize,
    pub approved: usize,
    pub pending: usize,
    /// Likes received across the viewer's own projects.
    pub total_likes: u64,
    pub saved: usize,
}

/// Outcome of [`Dashboard::refresh`], one entry per tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub feed: LoadOutcome,
    pub mine: LoadOutcome,
    pub saved: LoadOutcome,
}

pub struct Dashboard {
    feed: ListingStore,
    mine: ListingStore,
    saved: ListingStore,
}

impl Dashboard {
    pub fn new(catalog: Arc<dyn ProjectCatalog>) -> Self {
        Self {
            feed: ListingStore::new(Arc::clone(&catalog)),
            mine: ListingStore::new(Arc::clone(&catalog)),
            saved: ListingStore::new(catalog),
        }
    }

    pub fn feed(&self) -> &ListingStore {
        &self.feed
    }

    pub fn mine(&self) -> &ListingStore {
        &self.mine
    }

    pub fn saved(&self) -> &ListingStore {
        &self.saved
    }

    /// Reloads all three tabs concurrently for `viewer`.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self, viewer: Option<UserId>) -> RefreshOutcome {
        let (feed, mine, saved) = tokio::join!(
            self.feed.load(Scope::All, viewer.clone()),
            self.mine.load(Scope::Owned, viewer.clone()),
            self.saved.load(Scope::Bookmarked, viewer),
        );
        RefreshOutcome { feed, mine, saved }
    }

    /// True while any tab is still loading.
    pub async fn is_loading(&self) -> bool {
        self.feed.snapshot().await.is_loading()
            || self.mine.snapshot().await.is_loading()
            || self.saved.snapshot().await.is_loading()
    }

    /// The first recorded error, checked feed, then mine, then saved.
    pub async fn first_error(&self) -> Option<CatalogError> {
        for store in [&self.feed, &self.mine, &self.saved] {
            if let Some(err) = store.snapshot().await.error {
                return Some(err);
            }
        }
        None
    }

    /// Toggles the like through the first tab (feed, mine, saved) whose
    /// listing holds `id`, then mirrors the confirmed change into the others
    /// when they were loaded for the same viewer.
    pub async fn toggle_like(&self, id: &ProjectId) -> ToggleOutcome {
        let (home, others) = self.route(id).await;
        let viewer = home.viewer().await;
        let outcome = home.toggle_like(id).await;
        if let ToggleOutcome::Applied { member } = outcome {
            for store in self.same_viewer(others, viewer.as_ref()).await {
                store.apply_like(id, member).await;
            }
        }
        outcome
    }

    /// Same routing as [`Dashboard::toggle_like`]. A new bookmark is not
    /// inserted into the saved tab; it appears there on the next refresh.
    pub async fn toggle_bookmark(&self, id: &ProjectId) -> ToggleOutcome {
        let (home, others) = self.route(id).await;
        let viewer = home.viewer().await;
        let outcome = home.toggle_bookmark(id).await;
        if let ToggleOutcome::Applied { member } = outcome {
            for store in self.same_viewer(others, viewer.as_ref()).await {
                store.apply_bookmark(id, member).await;
            }
        }
        outcome
    }

    /// The viewer's submissions still waiting for moderation.
    pub async fn pending_submissions(&self) -> Vec<Project> {
        self.mine
            .snapshot()
            .await
            .items
            .into_iter()
            .filter(|p| p.status == ProjectStatus::Pending)
            .collect()
    }

    pub async fn stats(&self) -> DashboardStats {
        let mine = self.mine.snapshot().await;
        let saved = self.saved.snapshot().await;

        let count = |status: ProjectStatus| {
            mine.items.iter().filter(|p| p.status == status).count()
        };
        DashboardStats {
            submitted: mine.items.len(),
            approved: count(ProjectStatus::Approved),
            pending: count(ProjectStatus::Pending),
            total_likes: mine.items.iter().map(|p| u64::from(p.likes_count)).sum(),
            saved: saved.items.len(),
        }
    }

    /// Stores among `stores` that were last loaded for `viewer`.
    async fn same_viewer<'a>(
        &self,
        stores: [&'a ListingStore; 2],
        viewer: Option<&UserId>,
    ) -> Vec<&'a ListingStore> {
        let mut matching = Vec::with_capacity(stores.len());
        for store in stores {
            if viewer.is_some() && store.viewer().await.as_ref() == viewer {
                matching.push(store);
            }
        }
        matching
    }

    async fn route(&self, id: &ProjectId) -> (&ListingStore, [&ListingStore; 2]) {
        if self.feed.contains(id).await {
            (&self.feed, [&self.mine, &self.saved])
        } else if self.mine.contains(id).await {
            (&self.mine, [&self.feed, &self.saved])
        } else if self.saved.contains(id).await {
            (&self.saved, [&self.feed, &self.mine])
        } else {
            (&self.feed, [&self.mine, &self.saved])
        }
    }
}
