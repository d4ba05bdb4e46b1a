//! # storage-adapters
//!
//! Backend implementations of the domain ports.
//!
//! - [`memory::InMemoryCatalog`]: always compiled, process-local.
//! - [`rest::RestCatalog`]: the hosted data API (feature `backend-rest`).

pub mod memory;
#[cfg(feature = "backend-rest")]
pub mod rest;

pub use memory::{CatalogOp, InMemoryCatalog, NewProject};
#[cfg(feature = "backend-rest")]
pub use rest::RestCatalog;
