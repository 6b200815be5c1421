//! TUI screen drawing functions.

pub(crate) mod browse;
pub(crate) mod detail;
pub(crate) mod error;
