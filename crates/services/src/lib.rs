//! showcase/crates/services/src/lib.rs
//!
//! Client-side state built on the domain ports: project listings, the
//! dashboard that groups them, and taxonomy lookups.

pub mod dashboard;
pub mod listing_store;
pub mod taxonomy;

pub use dashboard::{Dashboard, DashboardStats, RefreshOutcome};
pub use listing_store::{ListingSnapshot, ListingStore, LoadOutcome, LoadPhase, ToggleOutcome};
pub use taxonomy::{Taxonomy, TaxonomyService};
