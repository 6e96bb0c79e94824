//! Search Module
//!
//! Debounced, cached, cancelable autocomplete over the catalog's `searchPokemon` query.

mod orchestrator;
mod state;

pub use orchestrator::{SearchOrchestrator, SearchSettings};
pub use state::{SearchSnapshot, SearchStatus, SearchView};
