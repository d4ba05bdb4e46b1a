//! # Hosted data API adapter
//!
//! `ProjectCatalog` + `TaxonomySource` over a PostgREST-style HTTP API
//! (`/rest/v1/<table>`), authenticated with the project's API key.
//! Nested rows (owner profile, category and tech-stack links) are embedded
//! in the select and flattened into [`Project`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    CatalogError, Category, Profile, Project, ProjectCatalog, ProjectId, ProjectQuery,
    ProjectStatus, Result, TaxonomySource, TechStack, UserId,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const PROJECT_COLUMNS: &str = "id,title,description,timeline,project_url,screenshot_url,status,\
likes_count,created_at,updated_at,user_id,\
profiles!projects_user_id_fkey(username,full_name,avatar_url),\
project_categories!inner(categories(name)),\
project_tech_stacks!inner(tech_stacks(name))";

/// HTTP client for one hosted project database.
pub struct RestCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl RestCatalog {
    /// * `base_url` - Project URL, e.g. `https://xyz.example.co`.
    /// * `timeout` - Applied to every request; there are no retries.
    pub fn new(base_url: impl Into<String>, api_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Reuses an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn get_rows<T: DeserializeOwned>(&self, table: &'static str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response, table).await?;
        response.json::<Vec<T>>().await.map_err(transport)
    }

    async fn exists(&self, table: &'static str, project: &ProjectId, user: &UserId) -> Result<bool> {
        let rows: Vec<serde_json::Value> = self
            .get_rows(
                table,
                &[
                    ("select", "project_id".to_string()),
                    ("project_id", eq(project.as_str())),
                    ("user_id", eq(user.as_str())),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn insert_edge(&self, table: &'static str, project: &ProjectId, user: &UserId) -> Result<()> {
        let body = serde_json::json!({
            "project_id": project,
            "user_id": user,
        });
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response, table).await.map(drop)
    }

    async fn delete_edge(&self, table: &'static str, project: &ProjectId, user: &UserId) -> Result<()> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[("project_id", eq(project.as_str())), ("user_id", eq(user.as_str()))])
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response, table).await.map(drop)
    }
}

#[async_trait]
impl ProjectCatalog for RestCatalog {
    #[tracing::instrument(skip(self), err)]
    async fn fetch_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let rows: Vec<ProjectRow> = match query {
            ProjectQuery::Approved => {
                self.get_rows(
                    "projects",
                    &[
                        ("select", PROJECT_COLUMNS.to_string()),
                        ("status", eq(ProjectStatus::Approved.as_str())),
                        ("order", "created_at.desc".to_string()),
                    ],
                )
                .await?
            }
            ProjectQuery::OwnedBy(user) => {
                self.get_rows(
                    "projects",
                    &[
                        ("select", PROJECT_COLUMNS.to_string()),
                        ("user_id", eq(user.as_str())),
                        ("order", "created_at.desc".to_string()),
                    ],
                )
                .await?
            }
            ProjectQuery::BookmarkedBy(user) => {
                let rows: Vec<BookmarkRow> = self
                    .get_rows(
                        "project_bookmarks",
                        &[
                            ("select", format!("project_id,projects!inner({PROJECT_COLUMNS})")),
                            ("user_id", eq(user.as_str())),
                            ("projects.status", eq(ProjectStatus::Approved.as_str())),
                        ],
                    )
                    .await?;
                rows.into_iter().map(|row| row.projects).collect()
            }
        };
        Ok(into_projects(rows))
    }

    async fn is_liked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.exists("project_likes", project, user).await
    }

    async fn add_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.insert_edge("project_likes", project, user).await
    }

    async fn remove_like(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.delete_edge("project_likes", project, user).await
    }

    async fn is_bookmarked(&self, project: &ProjectId, user: &UserId) -> Result<bool> {
        self.exists("project_bookmarks", project, user).await
    }

    async fn add_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.insert_edge("project_bookmarks", project, user).await
    }

    async fn remove_bookmark(&self, project: &ProjectId, user: &UserId) -> Result<()> {
        self.delete_edge("project_bookmarks", project, user).await
    }
}

#[async_trait]
impl TaxonomySource for RestCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_rows("categories", &[("select", "*".to_string()), ("order", "name".to_string())])
            .await
    }

    async fn list_tech_stacks(&self) -> Result<Vec<TechStack>> {
        self.get_rows("tech_stacks", &[("select", "*".to_string()), ("order", "name".to_string())])
            .await
    }
}

// ---- wire rows ----

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: ProjectId,
    title: String,
    description: String,
    timeline: String,
    project_url: String,
    screenshot_url: Option<String>,
    status: ProjectStatus,
    likes_count: i64,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    profiles: Option<Profile>,
    #[serde(default)]
    project_categories: Vec<CategoryLink>,
    #[serde(default)]
    project_tech_stacks: Vec<TechStackLink>,
}

#[derive(Debug, Deserialize)]
struct BookmarkRow {
    projects: ProjectRow,
}

#[derive(Debug, Deserialize)]
struct NameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CategoryLink {
    categories: Option<NameRow>,
}

#[derive(Debug, Deserialize)]
struct TechStackLink {
    tech_stacks: Option<NameRow>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            timeline: row.timeline,
            project_url: row.project_url,
            screenshot_url: row.screenshot_url,
            status: row.status,
            likes_count: u32::try_from(row.likes_count.max(0)).unwrap_or(u32::MAX),
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            categories: row
                .project_categories
                .into_iter()
                .filter_map(|link| link.categories.map(|c| c.name))
                .collect(),
            tech_stacks: row
                .project_tech_stacks
                .into_iter()
                .filter_map(|link| link.tech_stacks.map(|t| t.name))
                .collect(),
            owner: row.profiles,
        }
    }
}

/// Flattens rows and orders them newest first; the bookmark join has no
/// server-side order.
fn into_projects(rows: Vec<ProjectRow>) -> Vec<Project> {
    let mut projects: Vec<Project> = rows.into_iter().map(Project::from).collect();
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    projects
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

fn transport(err: reqwest::Error) -> CatalogError {
    CatalogError::Network(err.to_string())
}

async fn ensure_success(response: reqwest::Response, table: &'static str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(status_error(status, &body, table))
}

fn status_error(status: StatusCode, body: &str, table: &'static str) -> CatalogError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Forbidden(message),
        StatusCode::NOT_FOUND => CatalogError::NotFound {
            entity: table,
            id: message,
        },
        _ => CatalogError::Unknown(format!("{} ({})", message, status.as_u16())),
    }
}
