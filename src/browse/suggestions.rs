//! Autocomplete suggestions for the search box.

use crate::catalog::filter::filter_titles;
use crate::catalog::GameRecord;

pub const INITIAL_REVEAL_LIMIT: usize = 5;
pub const SUGGESTION_STEP: usize = 5;

/// Title matches for the current query plus how many of them are shown.
///
/// `matches` holds indices into the catalog the state was last updated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionState {
    matches: Vec<usize>,
    reveal_limit: usize,
    step: usize,
}

impl Default for SuggestionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::with_step(SUGGESTION_STEP)
    }

    /// Start at [`INITIAL_REVEAL_LIMIT`] rows; each "See more" adds `step`.
    pub fn with_step(step: usize) -> Self {
        Self {
            matches: Vec::new(),
            reveal_limit: INITIAL_REVEAL_LIMIT,
            step: step.max(1),
        }
    }

    /// Recompute matches. An empty query closes the list but keeps the limit.
    pub fn update(&mut self, catalog: &[GameRecord], query: &str) {
        self.matches = derive_suggestions(catalog, query);
    }

    /// Grow the limit by one step without re-filtering.
    pub fn reveal_more(&mut self) {
        self.reveal_limit = self.reveal_limit.saturating_add(self.step);
    }

    /// Pick the `pos`-th revealed suggestion. Returns the title to put in the
    /// search box and closes the list.
    pub fn select(&mut self, catalog: &[GameRecord], pos: usize) -> Option<String> {
        let idx = *self.revealed().get(pos)?;
        let title = catalog.get(idx)?.title.clone();
        self.clear();
        Some(title)
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn reveal_limit(&self) -> usize {
        self.reveal_limit
    }

    pub fn revealed(&self) -> &[usize] {
        &self.matches[..self.reveal_limit.min(self.matches.len())]
    }

    pub fn more_available(&self) -> bool {
        self.matches.len() > self.reveal_limit
    }

    pub fn is_open(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// All suggestion matches for `query`; none at all for an empty query.
pub fn derive_suggestions(catalog: &[GameRecord], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    filter_titles(catalog, query)
}
