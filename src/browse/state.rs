//! Browse state: catalog, search text, suggestions and page cursor in one place.
//!
//! Everything except the query and the page/reveal cursors is derived from the
//! current [`CatalogSnapshot`] and recomputed when either input changes.

use std::ops::Range;

use super::pager::{page_window, Pager};
use super::suggestions::SuggestionState;
use crate::catalog::filter::filter_titles;
use crate::catalog::{CatalogSnapshot, CatalogStatus, GameRecord, Platform};
use crate::config::BrowseConfig;

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Loading,
    /// Fetch failed and there is nothing to fall back on.
    Failed(String),
    Empty,
    Populated,
}

/// One page of filtered results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredPage {
    /// Catalog indices of every match, catalog order.
    pub matches: Vec<usize>,
    /// Range into `matches` for the requested page.
    pub window: Range<usize>,
    pub page: usize,
    pub page_count: usize,
}

impl FilteredPage {
    pub fn visible(&self) -> &[usize] {
        &self.matches[self.window.clone()]
    }
}

pub fn derive_filtered_page(
    catalog: &[GameRecord],
    query: &str,
    page: usize,
    page_size: usize,
) -> FilteredPage {
    let matches = filter_titles(catalog, query);
    let page_size = page_size.max(1);
    FilteredPage {
        window: page_window(matches.len(), page, page_size),
        page_count: matches.len().div_ceil(page_size),
        page,
        matches,
    }
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    snapshot: CatalogSnapshot,
    query: String,
    filtered: Vec<usize>,
    suggestions: SuggestionState,
    pager: Pager,
}

impl BrowseState {
    pub fn new(snapshot: CatalogSnapshot, config: &BrowseConfig) -> Self {
        let filtered = filter_titles(&snapshot.records, "");
        Self {
            snapshot,
            query: String::new(),
            filtered,
            suggestions: SuggestionState::with_step(config.suggestion_step),
            pager: Pager::new(config.page_size),
        }
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn catalog(&self) -> &[GameRecord] {
        &self.snapshot.records
    }

    pub fn platform(&self) -> Platform {
        self.snapshot.platform
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Take a new snapshot from the store. A replaced catalog re-derives the
    /// result list and sends the pager back to page 1.
    pub fn apply_snapshot(&mut self, snapshot: CatalogSnapshot) {
        let replaced = snapshot.revision != self.snapshot.revision;
        self.snapshot = snapshot;
        if !replaced {
            return;
        }
        self.filtered = filter_titles(&self.snapshot.records, &self.query);
        if self.suggestions.is_open() {
            self.suggestions.update(&self.snapshot.records, &self.query);
        } else {
            // Old indices point into the previous catalog.
            self.suggestions.clear();
        }
        self.pager.reset();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.suggestions.update(&self.snapshot.records, &self.query);
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    fn refilter(&mut self) {
        self.filtered = filter_titles(&self.snapshot.records, &self.query);
        self.pager.reset();
    }

    // Suggestions

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn revealed_suggestions(&self) -> Vec<&GameRecord> {
        self.suggestions
            .revealed()
            .iter()
            .filter_map(|&idx| self.snapshot.records.get(idx))
            .collect()
    }

    pub fn reveal_more(&mut self) {
        self.suggestions.reveal_more();
    }

    /// Put the chosen suggestion's title in the search box and close the list.
    pub fn select_suggestion(&mut self, pos: usize) -> bool {
        match self.suggestions.select(&self.snapshot.records, pos) {
            Some(title) => {
                self.query = title;
                self.refilter();
                true
            }
            None => false,
        }
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions.clear();
    }

    // Results and paging

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.filtered.len())
    }

    pub fn has_next_page(&self) -> bool {
        self.pager.has_next(self.filtered.len())
    }

    pub fn has_prev_page(&self) -> bool {
        self.pager.has_prev()
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.filtered.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn page_records(&self) -> Vec<&GameRecord> {
        self.filtered[self.pager.window(self.filtered.len())]
            .iter()
            .filter_map(|&idx| self.snapshot.records.get(idx))
            .collect()
    }

    pub fn listing(&self) -> Listing {
        if self.snapshot.status == CatalogStatus::Loading {
            return Listing::Loading;
        }
        if !self.filtered.is_empty() {
            return Listing::Populated;
        }
        match &self.snapshot.status {
            CatalogStatus::Failed(message) if self.snapshot.records.is_empty() => {
                Listing::Failed(message.clone())
            }
            _ => Listing::Empty,
        }
    }
}
