//! TUI application state types.

use std::time::Instant;

use tokio::sync::watch;

use crate::browse::BrowseState;
use crate::catalog::{
    CatalogSnapshot, CatalogStore, Completion, FetchOutcome, FetchTicket, Platform,
};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Browse,
    Detail,
    ErrorModal,
}

/// Which part of the browse screen receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Search,
    Suggestions,
    Results,
}

/// Row under the cursor in the suggestion dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SuggestionRow {
    Game(usize),
    SeeMore,
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorModalState {
    pub title: String,
    pub message: String,
}

/// Side effects the event loop performs after a key is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Fetch(FetchTicket),
    OpenUrl(String),
}

pub(crate) struct AnimationState {
    pub tick: u64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[(self.tick as usize / 6) % FRAMES.len()]
    }
}

pub(crate) struct App {
    pub screen: Screen,
    pub focus: Focus,
    pub store: CatalogStore,
    pub catalog_rx: watch::Receiver<CatalogSnapshot>,
    pub browse: BrowseState,
    pub suggestion_cursor: usize,
    /// Position within the visible page.
    pub result_cursor: usize,
    /// Catalog index shown in the detail view.
    pub detail: Option<usize>,
    pub error_modal: Option<ErrorModalState>,
    pub error_return_screen: Screen,
    pub pending_action: Option<Action>,
    pub last_tick: Instant,
    pub animation: AnimationState,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let store = CatalogStore::new(config.catalog.default_platform);
        let catalog_rx = store.subscribe();
        let browse = BrowseState::new(store.snapshot(), &config.browse);
        Self {
            screen: Screen::Browse,
            focus: Focus::Search,
            store,
            catalog_rx,
            browse,
            suggestion_cursor: 0,
            result_cursor: 0,
            detail: None,
            error_modal: None,
            error_return_screen: Screen::Browse,
            pending_action: None,
            last_tick: Instant::now(),
            animation: AnimationState::new(),
        }
    }

    /// Initial load for the configured platform.
    pub fn start(&mut self) {
        let platform = self.store.platform();
        let ticket = self.store.select_platform(platform);
        self.pending_action = Some(Action::Fetch(ticket));
        self.sync_catalog();
    }

    pub fn switch_platform(&mut self, platform: Platform) {
        let ticket = self.store.select_platform(platform);
        tracing::info!(%platform, "platform selected");
        self.pending_action = Some(Action::Fetch(ticket));
        self.sync_catalog();
    }

    pub fn toggle_platform(&mut self) {
        let next = self.browse.platform().toggled();
        self.switch_platform(next);
    }

    pub fn retry(&mut self) {
        let ticket = self.store.refresh();
        tracing::info!(platform = %ticket.platform, "retrying catalog fetch");
        self.pending_action = Some(Action::Fetch(ticket));
        self.sync_catalog();
    }

    pub fn finish_fetch(&mut self, outcome: FetchOutcome) -> Completion {
        let (ticket, result) = outcome;
        let completion = self.store.complete(ticket, result);
        self.sync_catalog();
        completion
    }

    /// Pull the latest store snapshot into the browse state.
    pub fn sync_catalog(&mut self) {
        if !self.catalog_rx.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.catalog_rx.borrow_and_update().clone();
        let revision = self.browse.snapshot().revision;
        self.browse.apply_snapshot(snapshot);
        if self.browse.snapshot().revision != revision {
            self.result_cursor = 0;
            self.suggestion_cursor = 0;
            // `detail` indexes the replaced catalog.
            self.close_detail();
        }
    }

    pub fn suggestion_rows(&self) -> Vec<SuggestionRow> {
        let suggestions = self.browse.suggestions();
        let mut rows: Vec<SuggestionRow> = (0..suggestions.revealed().len())
            .map(SuggestionRow::Game)
            .collect();
        if suggestions.more_available() {
            rows.push(SuggestionRow::SeeMore);
        }
        rows
    }

    /// Catalog index of the highlighted result on the current page.
    pub fn selected_result(&self) -> Option<usize> {
        let window = self.browse.page_records();
        if window.is_empty() {
            return None;
        }
        let pos = self.result_cursor.min(window.len() - 1);
        let start = (self.browse.page() - 1) * self.browse.page_size();
        self.browse.filtered().get(start + pos).copied()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        if self.screen == Screen::Detail {
            self.screen = Screen::Browse;
        }
        if self.error_return_screen == Screen::Detail {
            self.error_return_screen = Screen::Browse;
        }
    }

    pub fn set_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        if self.screen != Screen::ErrorModal {
            self.error_return_screen = self.screen;
        }
        self.error_modal = Some(ErrorModalState {
            title: title.into(),
            message: message.into(),
        });
        self.screen = Screen::ErrorModal;
    }
}
