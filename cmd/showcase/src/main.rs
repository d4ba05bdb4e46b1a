//! # Showcase Binary
//!
//! Loads settings, wires the configured backend into a listing store, loads
//! one scope for one viewer and prints it.
//!
//! | Variable                       | Default  | Description                       |
//! |--------------------------------|----------|-----------------------------------|
//! | `SHOWCASE__BACKEND__MODE`      | `memory` | `memory` or `rest`                |
//! | `SHOWCASE__BACKEND__URL`       | --       | Hosted API base URL (rest)        |
//! | `SHOWCASE__BACKEND__API_KEY`   | --       | Hosted API key (rest)             |
//! | `SHOWCASE__LISTING__SCOPE`     | `all`    | `all`, `owned` or `bookmarked`    |
//! | `SHOWCASE__LISTING__VIEWER_ID` | --       | Viewer; unset browses anonymously |
//! | `SHOWCASE__LOG__JSON`          | `false`  | JSON log lines                    |

mod demo;

use std::sync::Arc;

use anyhow::Context;
use configs::{BackendMode, BackendSettings, LogSettings, Settings};
use domains::{ProjectCatalog, TaxonomySource};
use services::{ListingStore, LoadOutcome, TaxonomyService};
use storage_adapters::InMemoryCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "showcase=info,services=info,storage_adapters=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = configs::load_dotenv();
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);
    if let Err(err) = dotenv {
        tracing::warn!(error = %err, "ignoring unreadable .env file");
    }

    let Settings { backend, listing, .. } = settings;

    tracing::info!(mode = ?backend.mode, scope = %listing.scope, "starting showcase");
    let (catalog, taxonomy) = build_backend(backend)?;

    match TaxonomyService::new(taxonomy).load().await {
        Ok(t) => tracing::info!(
            categories = t.categories.len(),
            tech_stacks = t.tech_stacks.len(),
            "taxonomy loaded"
        ),
        Err(err) => tracing::warn!(error = %err, "taxonomy unavailable"),
    }

    let store = ListingStore::new(catalog);
    let outcome = store.load(listing.scope, listing.viewer_id).await;
    let snapshot = store.snapshot().await;

    match outcome {
        LoadOutcome::Empty => {
            println!("Sign in to see {} projects.", listing.scope);
        }
        LoadOutcome::Failed(err) => {
            anyhow::bail!("failed to load projects: {err}");
        }
        LoadOutcome::Loaded { .. } | LoadOutcome::Superseded => {
            if snapshot.items.is_empty() {
                println!("No projects yet.");
            }
            for project in &snapshot.items {
                let liked = if snapshot.is_liked(&project.id) { "♥" } else { "♡" };
                let saved = if snapshot.is_bookmarked(&project.id) { "★" } else { "☆" };
                println!(
                    "{liked} {saved} {:>4}  {}  [{}]  {}",
                    project.likes_count,
                    project.title,
                    project.status.as_str(),
                    project.project_url,
                );
            }
        }
    }
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(log.filter.as_deref().unwrap_or(DEFAULT_FILTER))
    });
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

type Backend = (Arc<dyn ProjectCatalog>, Arc<dyn TaxonomySource>);

fn build_backend(backend: BackendSettings) -> anyhow::Result<Backend> {
    match backend.mode {
        BackendMode::Memory => {
            let catalog = Arc::new(InMemoryCatalog::new());
            demo::seed(&catalog);
            tracing::info!(viewer = demo::DEMO_USER_ID, "seeded in-memory catalog");
            let projects: Arc<dyn ProjectCatalog> = catalog.clone();
            let taxonomy: Arc<dyn TaxonomySource> = catalog;
            Ok((projects, taxonomy))
        }
        #[cfg(feature = "backend-rest")]
        BackendMode::Rest => {
            let timeout = backend.timeout();
            let url = backend.url.context("backend.url is not set")?;
            let key = backend.api_key.context("backend.api_key is not set")?;
            let catalog = Arc::new(storage_adapters::RestCatalog::new(url, key, timeout)?);
            let projects: Arc<dyn ProjectCatalog> = catalog.clone();
            let taxonomy: Arc<dyn TaxonomySource> = catalog;
            Ok((projects, taxonomy))
        }
        #[cfg(not(feature = "backend-rest"))]
        BackendMode::Rest => {
            anyhow::bail!("this build has no hosted API support; rebuild with `backend-rest`")
        }
    }
}
