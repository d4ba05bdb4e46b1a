//! showcase/crates/domains/src/lib.rs
//!
//! Domain models, the error taxonomy, and the port traits that backend
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    fn project(likes: u32) -> Project {
        let now = chrono::Utc::now();
        Project {
            id: ProjectId::new("p-1"),
            title: "Rusty Board".to_string(),
            description: "An imageboard".to_string(),
            timeline: "3 weeks".to_string(),
            project_url: "https://example.com".to_string(),
            screenshot_url: None,
            status: ProjectStatus::Approved,
            likes_count: likes,
            user_id: UserId::new("u-1"),
            created_at: now,
            updated_at: now,
            categories: vec!["Web".to_string()],
            tech_stacks: vec!["Rust".to_string()],
            owner: None,
        }
    }

    #[test]
    fn test_scope_without_viewer_resolves_to_nothing() {
        assert!(Scope::Owned.resolve(None).is_none());
        assert!(Scope::Bookmarked.resolve(None).is_none());
        assert_eq!(Scope::All.resolve(None), Some(ProjectQuery::Approved));
    }

    #[test]
    fn test_scope_binds_viewer() {
        let viewer = UserId::new("u-1");
        let query = Scope::Bookmarked.resolve(Some(&viewer)).unwrap();
        assert_eq!(query, ProjectQuery::BookmarkedBy(viewer.clone()));
        assert_eq!(query.scope(), Scope::Bookmarked);
        // The feed query is the same for every viewer.
        assert_eq!(Scope::All.resolve(Some(&viewer)), Some(ProjectQuery::Approved));
    }

    #[test]
    fn test_scope_parses_legacy_names() {
        assert_eq!("user".parse::<Scope>().unwrap(), Scope::Owned);
        assert_eq!("Bookmarks".parse::<Scope>().unwrap(), Scope::Bookmarked);
        assert!("trending".parse::<Scope>().is_err());
    }

    #[test]
    fn test_like_counter_never_goes_negative() {
        let mut p = project(0);
        p.adjust_likes(false);
        assert_eq!(p.likes_count, 0);
        p.adjust_likes(true);
        assert_eq!(p.likes_count, 1);
    }

    #[test]
    fn test_status_wire_form() {
        let json = serde_json::to_string(&ProjectStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let back: ProjectStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, ProjectStatus::Rejected);
    }
}
