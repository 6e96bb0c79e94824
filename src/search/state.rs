//! Search state exposed to the presentation layer.

use crate::error::PokedexError;
use crate::models::PreviewItem;

/// Phase of the search state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// Query too short, nothing requested
    #[default]
    Idle,
    /// Results served from the query cache
    Cached,
    /// A request for the current query is in flight
    Loading,
    /// Results arrived from the network
    Resolved,
    /// The request for the current query failed
    Failed,
}

/// What the UI should render; each case is distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchView {
    TypeMore,
    Loading,
    Error,
    NoResults,
    Results,
}

/// Consistent (results, loading, error) view of the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    /// Trimmed query the snapshot belongs to, empty when idle
    pub query: String,
    pub status: SearchStatus,
    pub results: Vec<PreviewItem>,
    pub error: Option<PokedexError>,
}

impl SearchSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn cached(query: impl Into<String>, results: Vec<PreviewItem>) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Cached,
            results,
            error: None,
        }
    }

    pub fn resolved(query: impl Into<String>, results: Vec<PreviewItem>) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Resolved,
            results,
            error: None,
        }
    }

    pub fn failed(query: impl Into<String>, error: PokedexError) -> Self {
        Self {
            query: query.into(),
            status: SearchStatus::Failed,
            results: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn view(&self) -> SearchView {
        match self.status {
            SearchStatus::Idle => SearchView::TypeMore,
            SearchStatus::Loading => SearchView::Loading,
            SearchStatus::Failed => SearchView::Error,
            SearchStatus::Cached | SearchStatus::Resolved if self.results.is_empty() => {
                SearchView::NoResults
            }
            SearchStatus::Cached | SearchStatus::Resolved => SearchView::Results,
        }
    }
}
