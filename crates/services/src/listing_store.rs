//! # Listing Store
//!
//! Holds the current view of one project scope for one viewer: the fetched
//! items, which of them the viewer liked or bookmarked, and the outcome of the
//! last operation. Toggles only touch local state after the backend confirms
//! them, so a failed toggle leaves nothing to roll back.
//!
//! Concurrent `load` calls resolve as last-issued-wins: every call takes a
//! ticket and only the holder of the newest ticket may commit.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use domains::{CatalogError, Project, ProjectCatalog, ProjectId, ProjectQuery, Scope, UserId};
use futures_util::future::{try_join, try_join_all};
use tokio::sync::RwLock;

/// Where the store is in its `idle -> loading -> settled` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// How a `load` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    /// The scope needs a viewer and none was given. Not an error.
    Empty,
    Failed(CatalogError),
    /// A newer `load` was issued before this one settled; its result was dropped.
    Superseded,
}

/// How a toggle call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No viewer; nothing was sent.
    Skipped,
    /// The backend confirmed the change. `member` is the new membership.
    Applied { member: bool },
    Failed(CatalogError),
}

/// Immutable copy of the store handed to the rendering layer.
#[derive(Debug, Clone, Default)]
pub struct ListingSnapshot {
    pub scope: Scope,
    pub viewer: Option<UserId>,
    pub items: Vec<Project>,
    pub phase: LoadPhase,
    pub error: Option<CatalogError>,
    pub liked_ids: HashSet<ProjectId>,
    pub bookmarked_ids: HashSet<ProjectId>,
}

impl ListingSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_liked(&self, id: &ProjectId) -> bool {
        self.liked_ids.contains(id)
    }

    pub fn is_bookmarked(&self, id: &ProjectId) -> bool {
        self.bookmarked_ids.contains(id)
    }

    pub fn find(&self, id: &ProjectId) -> Option<&Project> {
        self.items.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, Copy)]
enum Membership {
    Like,
    Bookmark,
}

impl Membership {
    fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Bookmark => "bookmark",
        }
    }
}

#[derive(Debug, Default)]
struct ListingState {
    scope: Scope,
    viewer: Option<UserId>,
    items: Vec<Project>,
    phase: LoadPhase,
    error: Option<CatalogError>,
    liked: HashSet<ProjectId>,
    bookmarked: HashSet<ProjectId>,
}

impl ListingState {
    fn clear_listing(&mut self) {
        self.items.clear();
        self.liked.clear();
        self.bookmarked.clear();
    }

    /// Sets membership for `id`. Returns whether anything changed.
    fn set_member(&mut self, kind: Membership, id: &ProjectId, member: bool) -> bool {
        let set = match kind {
            Membership::Like => &mut self.liked,
            Membership::Bookmark => &mut self.bookmarked,
        };
        let changed = if member {
            set.insert(id.clone())
        } else {
            set.remove(id)
        };

        // Bookmarks have no public counter.
        if changed && matches!(kind, Membership::Like) {
            if let Some(project) = self.items.iter_mut().find(|p| &p.id == id) {
                project.adjust_likes(member);
            }
        }
        changed
    }
}

type Fetched = (Vec<Project>, HashSet<ProjectId>, HashSet<ProjectId>);

/// Client-side state for one mounted project listing.
pub struct ListingStore {
    catalog: Arc<dyn ProjectCatalog>,
    state: RwLock<ListingState>,
    latest: AtomicU64,
}

impl ListingStore {
    pub fn new(catalog: Arc<dyn ProjectCatalog>) -> Self {
        Self {
            catalog,
            state: RwLock::new(ListingState::default()),
            latest: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> ListingSnapshot {
        let st = self.state.read().await;
        ListingSnapshot {
            scope: st.scope,
            viewer: st.viewer.clone(),
            items: st.items.clone(),
            phase: st.phase,
            error: st.error.clone(),
            liked_ids: st.liked.clone(),
            bookmarked_ids: st.bookmarked.clone(),
        }
    }

    /// The viewer of the most recently issued load.
    pub async fn viewer(&self) -> Option<UserId> {
        self.state.read().await.viewer.clone()
    }

    /// Whether the current listing holds `id`.
    pub async fn contains(&self, id: &ProjectId) -> bool {
        self.state.read().await.items.iter().any(|p| &p.id == id)
    }

    /// Fetches `scope` on behalf of `viewer` and replaces the current listing.
    ///
    /// On failure the listing and both membership sets are cleared and the
    /// error is recorded. The store always leaves `Loading` once the newest
    /// call settles.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, scope: Scope, viewer: Option<UserId>) -> LoadOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(query) = scope.resolve(viewer.as_ref()) else {
            let mut st = self.state.write().await;
            if !self.is_current(ticket) {
                return LoadOutcome::Superseded;
            }
            st.scope = scope;
            st.viewer = None;
            st.clear_listing();
            st.error = None;
            st.phase = LoadPhase::Ready;
            tracing::debug!("scope requires a viewer; listing is empty");
            return LoadOutcome::Empty;
        };

        {
            let mut st = self.state.write().await;
            if !self.is_current(ticket) {
                return LoadOutcome::Superseded;
            }
            // Membership belongs to the previous viewer until the fetch lands.
            if st.viewer != viewer {
                st.liked.clear();
                st.bookmarked.clear();
            }
            st.scope = scope;
            st.viewer = viewer.clone();
            st.error = None;
            st.phase = LoadPhase::Loading;
        }

        let result = self.fetch(&query, viewer.as_ref()).await;

        let mut st = self.state.write().await;
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "discarding stale load result");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok((items, liked, bookmarked)) => {
                let count = items.len();
                st.items = items;
                st.liked = liked;
                st.bookmarked = bookmarked;
                st.phase = LoadPhase::Ready;
                tracing::debug!(count, "listing loaded");
                LoadOutcome::Loaded { count }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load projects");
                st.clear_listing();
                st.error = Some(err.clone());
                st.phase = LoadPhase::Failed;
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Likes or unlikes `id` for the current viewer and adjusts its counter.
    #[tracing::instrument(skip(self), fields(project_id = %id))]
    pub async fn toggle_like(&self, id: &ProjectId) -> ToggleOutcome {
        self.toggle(Membership::Like, id).await
    }

    /// Bookmarks or un-bookmarks `id` for the current viewer.
    #[tracing::instrument(skip(self), fields(project_id = %id))]
    pub async fn toggle_bookmark(&self, id: &ProjectId) -> ToggleOutcome {
        self.toggle(Membership::Bookmark, id).await
    }

    /// Reconciles a like that was confirmed elsewhere, without calling the
    /// backend. Returns whether local state changed.
    pub async fn apply_like(&self, id: &ProjectId, liked: bool) -> bool {
        self.state.write().await.set_member(Membership::Like, id, liked)
    }

    /// Bookmark counterpart of [`ListingStore::apply_like`].
    pub async fn apply_bookmark(&self, id: &ProjectId, bookmarked: bool) -> bool {
        self.state
            .write()
            .await
            .set_member(Membership::Bookmark, id, bookmarked)
    }

    async fn toggle(&self, kind: Membership, id: &ProjectId) -> ToggleOutcome {
        let (viewer, was_member) = {
            let mut st = self.state.write().await;
            let Some(viewer) = st.viewer.clone() else {
                return ToggleOutcome::Skipped;
            };
            st.error = None;
            let was_member = match kind {
                Membership::Like => st.liked.contains(id),
                Membership::Bookmark => st.bookmarked.contains(id),
            };
            (viewer, was_member)
        };

        let result = match (kind, was_member) {
            (Membership::Like, true) => self.catalog.remove_like(id, &viewer).await,
            (Membership::Like, false) => self.catalog.add_like(id, &viewer).await,
            (Membership::Bookmark, true) => self.catalog.remove_bookmark(id, &viewer).await,
            (Membership::Bookmark, false) => self.catalog.add_bookmark(id, &viewer).await,
        };

        let mut st = self.state.write().await;
        match result {
            Ok(()) => {
                let member = !was_member;
                if st.viewer.as_ref() == Some(&viewer) {
                    st.set_member(kind, id, member);
                } else {
                    tracing::debug!(
                        kind = kind.as_str(),
                        "viewer changed mid-toggle; local state left to the next load"
                    );
                }
                ToggleOutcome::Applied { member }
            }
            Err(err) => {
                tracing::warn!(kind = kind.as_str(), error = %err, "toggle rejected by backend");
                st.error = Some(err.clone());
                ToggleOutcome::Failed(err)
            }
        }
    }

    async fn fetch(&self, query: &ProjectQuery, viewer: Option<&UserId>) -> domains::Result<Fetched> {
        let items = self.catalog.fetch_projects(query).await?;

        let Some(user) = viewer else {
            return Ok((items, HashSet::new(), HashSet::new()));
        };

        let likes = try_join_all(items.iter().map(|p| self.catalog.is_liked(&p.id, user)));
        let bookmarks = try_join_all(items.iter().map(|p| self.catalog.is_bookmarked(&p.id, user)));
        let (liked_flags, bookmarked_flags) = try_join(likes, bookmarks).await?;

        let liked = members(&items, &liked_flags);
        let bookmarked = members(&items, &bookmarked_flags);
        Ok((items, liked, bookmarked))
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

fn members(items: &[Project], flags: &[bool]) -> HashSet<ProjectId> {
    items
        .iter()
        .zip(flags)
        .filter(|(_, flag)| **flag)
        .map(|(p, _)| p.id.clone())
        .collect()
}
