//! Search Orchestrator
//!
//! Drives autocomplete: debounced input, cache lookup, cancelable requests
//! and the "latest request wins" rule.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::cache::SharedQueryCache;
use crate::client::{Executor, PokedexClient};
use crate::config::Config;
use crate::error::Result;
use crate::models::PreviewItem;
use crate::search::{SearchSnapshot, SearchStatus};
use crate::tasks::Debouncer;

// == Settings ==
/// Tunables of the search pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiescence window before a typed query is processed
    pub debounce: Duration,
    /// Minimum trimmed length (in characters) of a searchable query
    pub min_query_length: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(350),
            min_query_length: 2,
        }
    }
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            debounce: config.debounce_window(),
            min_query_length: config.min_query_length,
        }
    }
}

// == Request Control ==
/// Bookkeeping for the single active request.
#[derive(Debug, Default)]
struct Control {
    /// Bumped by every new request, reset and teardown
    generation: u64,
    /// Last trimmed query that was processed
    last_query: String,
    /// Task of the active request
    in_flight: Option<JoinHandle<()>>,
}

impl Control {
    /// Supersedes the active request and returns the new generation.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation
    }
}

struct Shared<E> {
    client: PokedexClient<E>,
    cache: SharedQueryCache,
    /// Raw search text, ahead of the debounced value
    input: watch::Receiver<String>,
    min_query_length: usize,
    control: Mutex<Control>,
    state: watch::Sender<SearchSnapshot>,
}

impl<E: Executor + 'static> Shared<E> {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, query: &str) -> Option<Vec<PreviewItem>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(query)
    }

    // == Process ==
    /// Processes a debounced query unless the text changed since it settled.
    ///
    /// The check runs under the control lock, so a `clear()` either lands
    /// before it (and the query is dropped) or supersedes what it dispatched.
    fn process_settled(self: &Arc<Self>, query: &str) {
        let control = self.control();
        if query.trim() != self.input.borrow().trim() {
            trace!(query = query.trim(), "settled query outdated by newer input, skipping");
            return;
        }
        self.step(control, query);
    }

    fn process(self: &Arc<Self>, query: &str) {
        self.step(self.control(), query);
    }

    /// One step of the state machine.
    fn step(self: &Arc<Self>, mut control: MutexGuard<'_, Control>, query: &str) {
        let trimmed = query.trim();

        if trimmed.chars().count() < self.min_query_length {
            control.supersede();
            control.last_query.clear();
            self.state.send_replace(SearchSnapshot::idle());
            return;
        }

        if trimmed == control.last_query {
            trace!(query = trimmed, "query unchanged, skipping");
            return;
        }

        let generation = control.supersede();
        control.last_query = trimmed.to_string();

        if let Some(results) = self.cached(trimmed) {
            debug!(query = trimmed, count = results.len(), "search served from cache");
            self.state
                .send_replace(SearchSnapshot::cached(trimmed, results));
            return;
        }

        // Previous results stay visible while loading
        self.state.send_modify(|snapshot| {
            snapshot.query = trimmed.to_string();
            snapshot.status = SearchStatus::Loading;
            snapshot.error = None;
        });
        debug!(query = trimmed, generation, "search request dispatched");

        let shared = Arc::clone(self);
        let query = trimmed.to_string();
        control.in_flight = Some(tokio::spawn(async move {
            let outcome = shared.client.search_pokemon(&query).await;
            shared.resolve(generation, &query, outcome);
        }));
    }

    // == Resolve ==
    /// Applies a finished request unless a newer one superseded it.
    fn resolve(&self, generation: u64, query: &str, outcome: Result<Vec<PreviewItem>>) {
        let mut control = self.control();
        if control.generation != generation {
            debug!(query, generation, "discarding stale search response");
            return;
        }
        control.in_flight = None;

        match outcome {
            Ok(results) => {
                self.cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .set(query, results.clone());
                debug!(query, count = results.len(), "search resolved");
                self.state
                    .send_replace(SearchSnapshot::resolved(query, results));
            }
            Err(err) => {
                warn!(query, error = %err, "search failed");
                self.state.send_replace(SearchSnapshot::failed(query, err));
            }
        }
    }

    // == Reset ==
    fn reset(&self) {
        let mut control = self.control();
        control.supersede();
        control.last_query.clear();
        self.state.send_replace(SearchSnapshot::idle());
    }
}

// == Search Orchestrator ==
/// Autocomplete search over a shared query cache.
///
/// Typed text goes through `set_search_text`; after the debounce window the
/// settled query is processed. Only the response to the most recently
/// dispatched request can change the visible snapshot. Dropping the
/// orchestrator cancels the debouncer and any in-flight request.
///
/// Must be created within a tokio runtime.
pub struct SearchOrchestrator<E: Executor + 'static> {
    shared: Arc<Shared<E>>,
    input: Debouncer<String>,
    driver: JoinHandle<()>,
}

impl<E: Executor + 'static> SearchOrchestrator<E> {
    // == Constructor ==
    pub fn new(client: PokedexClient<E>, cache: SharedQueryCache, settings: SearchSettings) -> Self {
        let input = Debouncer::new(String::new(), settings.debounce);
        let (state, _) = watch::channel(SearchSnapshot::idle());
        let shared = Arc::new(Shared {
            client,
            cache,
            input: input.watch_input(),
            min_query_length: settings.min_query_length,
            control: Mutex::new(Control::default()),
            state,
        });

        let driver = tokio::spawn(drive(Arc::clone(&shared), input.subscribe()));

        Self {
            shared,
            input,
            driver,
        }
    }

    /// Raw text as last typed.
    pub fn search_text(&self) -> String {
        self.input.current()
    }

    /// Feeds typed text; processing waits for the debounce window.
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.input.set(text.into());
    }

    /// Runs one state-machine step for `query` immediately, bypassing the debouncer.
    pub fn process_query(&self, query: &str) {
        self.shared.process(query);
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.state.subscribe()
    }

    pub fn results(&self) -> Vec<PreviewItem> {
        self.shared.state.borrow().results.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    // == Clear ==
    /// Empties the text, cancels any request and returns to `Idle`.
    pub fn clear(&self) {
        self.input.set(String::new());
        self.shared.reset();
    }
}

impl<E: Executor + 'static> Drop for SearchOrchestrator<E> {
    fn drop(&mut self) {
        self.driver.abort();
        self.shared.control().supersede();
    }
}

async fn drive<E: Executor + 'static>(shared: Arc<Shared<E>>, mut settled: watch::Receiver<String>) {
    while settled.changed().await.is_ok() {
        let query = settled.borrow_and_update().clone();
        shared.process_settled(&query);
    }
}
