//! Reusable TUI widget components.

pub(crate) mod card;
pub(crate) mod footer;
pub(crate) mod game_card;
pub(crate) mod header;
