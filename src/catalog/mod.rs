//! Catalog module
//!
//! Fetching, caching and filtering the externally owned games catalog.

mod client;
pub mod filter;
mod record;
mod store;

pub use client::{parse_catalog, CatalogClient, CatalogError};
pub use record::{GameRecord, Platform, UnknownPlatform};
pub use store::{
    spawn_fetch, CatalogSnapshot, CatalogStatus, CatalogStore, Completion, FetchOutcome,
    FetchTicket,
};
