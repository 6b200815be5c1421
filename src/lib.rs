//! ingame - browse the free-to-play games catalog from the terminal.
//!
//! The binary lives in `main.rs`; this library holds the catalog client, the
//! shared catalog store, the search/paging logic and the terminal UI so they
//! can be exercised from integration tests.

pub mod browse;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod tui;
