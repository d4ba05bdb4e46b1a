//! Demo data for the `memory` backend.

use domains::{Profile, ProjectStatus, UserId};
use storage_adapters::{InMemoryCatalog, NewProject};

/// Viewer id to use with `SHOWCASE__LISTING__VIEWER_ID` against demo data.
pub const DEMO_USER_ID: &str = "demo-user";

pub fn seed(catalog: &InMemoryCatalog) {
    for name in ["AI/ML", "Developer Tools", "Games", "Mobile", "Web"] {
        catalog.insert_category(name);
    }
    for name in ["Go", "PostgreSQL", "React", "Rust", "TypeScript"] {
        catalog.insert_tech_stack(name);
    }

    let demo = UserId::new(DEMO_USER_ID);
    let ferris = UserId::new("ferris");

    let profile = |username: &str, full_name: &str| Profile {
        username: username.to_string(),
        full_name: Some(full_name.to_string()),
        avatar_url: None,
    };

    catalog.submit(NewProject {
        description: "Terminal dashboard for home-lab metrics".to_string(),
        timeline: "6 weeks".to_string(),
        profile: Some(profile("ferris", "Ferris Crab")),
        categories: vec!["Developer Tools".to_string()],
        tech_stacks: vec!["Rust".to_string()],
        ..NewProject::new("Crabtop", ferris.clone())
    });
    catalog.submit(NewProject {
        description: "Collaborative pixel canvas".to_string(),
        timeline: "3 months".to_string(),
        profile: Some(profile("ferris", "Ferris Crab")),
        categories: vec!["Web".to_string(), "Games".to_string()],
        tech_stacks: vec!["TypeScript".to_string(), "React".to_string()],
        ..NewProject::new("Pixel Commons", ferris)
    });
    catalog.submit(NewProject {
        description: "Recipe search over a local embedding index".to_string(),
        timeline: "2 weeks".to_string(),
        profile: Some(profile("demouser", "Demo User")),
        categories: vec!["AI/ML".to_string()],
        tech_stacks: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        ..NewProject::new("Pantry Search", demo.clone())
    });
    catalog.submit(NewProject {
        description: "Habit tracker with offline sync".to_string(),
        timeline: "1 month".to_string(),
        profile: Some(profile("demouser", "Demo User")),
        categories: vec!["Mobile".to_string()],
        tech_stacks: vec!["TypeScript".to_string()],
        ..NewProject::new("Streaks", demo).status(ProjectStatus::Pending)
    });
}
