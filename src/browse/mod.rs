//! Search, suggestions and paging over the fetched catalog.

pub mod pager;
mod state;
pub mod suggestions;

pub use pager::{Pager, PAGE_SIZE};
pub use state::{derive_filtered_page, BrowseState, FilteredPage, Listing};
pub use suggestions::{
    derive_suggestions, SuggestionState, INITIAL_REVEAL_LIMIT, SUGGESTION_STEP,
};
