//! # Domain Models
//!
//! These structs represent the core entities of the project showcase.
//! Identifiers are opaque strings issued by the hosted data API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a project row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Moderation state of a submission. Transitions happen outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Public profile of the user who submitted a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A showcased project submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Free-form text describing how long the project took.
    pub timeline: String,
    pub project_url: String,
    pub screenshot_url: Option<String>,
    pub status: ProjectStatus,
    /// Last-known number of likes. Adjusted locally on toggle, refreshed on load.
    pub likes_count: u32,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub categories: Vec<String>,
    pub tech_stacks: Vec<String>,
    pub owner: Option<Profile>,
}

impl Project {
    /// Applies a confirmed like (`+1`) or unlike (`-1`) to the local counter.
    pub fn adjust_likes(&mut self, liked: bool) {
        if liked {
            self.likes_count = self.likes_count.saturating_add(1);
        } else {
            self.likes_count = self.likes_count.saturating_sub(1);
        }
    }
}

/// A browsing category (e.g. "Web", "Games").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A technology label attached to projects (e.g. "Rust").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Which subset of projects a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every approved project, newest first. Viewer optional.
    #[default]
    All,
    /// Projects submitted by the viewer, any status.
    #[serde(alias = "user")]
    Owned,
    /// Approved projects the viewer bookmarked.
    #[serde(alias = "bookmarks")]
    Bookmarked,
}

impl Scope {
    /// Binds the scope to a viewer.
    ///
    /// Returns `None` when the scope needs a viewer and there is none; callers
    /// treat that as an empty listing rather than a failure.
    pub fn resolve(self, viewer: Option<&UserId>) -> Option<ProjectQuery> {
        match (self, viewer) {
            (Self::All, _) => Some(ProjectQuery::Approved),
            (Self::Owned, Some(user)) => Some(ProjectQuery::OwnedBy(user.clone())),
            (Self::Bookmarked, Some(user)) => Some(ProjectQuery::BookmarkedBy(user.clone())),
            (Self::Owned | Self::Bookmarked, None) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Bookmarked => "bookmarked",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "owned" | "user" => Ok(Self::Owned),
            "bookmarked" | "bookmarks" => Ok(Self::Bookmarked),
            other => Err(format!("unknown scope '{other}'")),
        }
    }
}

/// A scope that has been bound to whatever viewer it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectQuery {
    /// Public feed. Viewer membership is checked separately.
    Approved,
    OwnedBy(UserId),
    BookmarkedBy(UserId),
}

impl ProjectQuery {
    pub fn scope(&self) -> Scope {
        match self {
            Self::Approved => Scope::All,
            Self::OwnedBy(_) => Scope::Owned,
            Self::BookmarkedBy(_) => Scope::Bookmarked,
        }
    }
}
