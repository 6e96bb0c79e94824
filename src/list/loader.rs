//! List Loader
//!
//! Loads catalog pages one at a time and appends them in server order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::client::{Executor, PokedexClient};
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{PokemonConnection, PokemonSummary, SortBy};

/// Result of a load call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived with this many items
    Loaded(usize),
    /// Nothing was requested or the page was dropped
    Skipped,
}

/// Read-only view of the list state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    pub items: Vec<PokemonSummary>,
    /// Server-reported size of the whole catalog, once known
    pub total_count: Option<i64>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
    pub is_loading: bool,
    pub error: Option<PokedexError>,
    pub sort_by: SortBy,
}

#[derive(Debug, Default)]
struct ListState {
    snapshot: ListSnapshot,
    /// Bumped when the sort order changes; results of older loads are dropped
    epoch: u64,
}

// == List Loader ==
/// Cursor-paginated catalog loader.
///
/// At most one page load runs at a time: a load requested while another is
/// in progress is skipped. `load_more` is also skipped when the server
/// reported no further page, including before the first page was loaded.
pub struct ListLoader<E> {
    client: PokedexClient<E>,
    page_size: u32,
    state: Mutex<ListState>,
}

impl<E: Executor> ListLoader<E> {
    pub fn new(client: PokedexClient<E>, page_size: u32, sort_by: SortBy) -> Self {
        let state = ListState {
            snapshot: ListSnapshot {
                sort_by,
                ..ListSnapshot::default()
            },
            epoch: 0,
        };
        Self {
            client,
            page_size,
            state: Mutex::new(state),
        }
    }

    pub fn from_config(client: PokedexClient<E>, config: &Config) -> Self {
        Self::new(client, config.page_size, SortBy::default())
    }

    /// Seeds the list with an already-fetched first page.
    pub fn with_page(self, page: PokemonConnection) -> Self {
        self.state().snapshot.apply_page(page, true);
        self
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state().snapshot.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // == Sort ==
    /// Changes the sort order and empties the list.
    ///
    /// A load still running for the previous order will be dropped.
    pub fn set_sort_by(&self, sort_by: SortBy) {
        let mut state = self.state();
        if state.snapshot.sort_by == sort_by {
            return;
        }
        state.epoch += 1;
        state.snapshot = ListSnapshot {
            sort_by,
            ..ListSnapshot::default()
        };
        info!(sort = %sort_by, "catalog sort order changed");
    }

    // == Load First Page ==
    /// Replaces the list with the first page for the current sort order.
    pub async fn load_first_page(&self) -> Result<LoadOutcome> {
        let Some((epoch, sort_by)) = self.begin(false) else {
            return Ok(LoadOutcome::Skipped);
        };

        let outcome = self
            .client
            .pokemons(Some(self.page_size), None, Some(sort_by))
            .await;
        self.finish(epoch, outcome, true)
    }

    // == Load More ==
    /// Appends the next page, preserving order.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let Some((epoch, sort_by)) = self.begin(true) else {
            return Ok(LoadOutcome::Skipped);
        };
        let cursor = self.state().snapshot.end_cursor.clone();

        let outcome = self
            .client
            .pokemons(Some(self.page_size), cursor.as_deref(), Some(sort_by))
            .await;
        self.finish(epoch, outcome, false)
    }

    /// Marks a load as running, or returns None if it must be skipped.
    fn begin(&self, needs_next_page: bool) -> Option<(u64, SortBy)> {
        let mut state = self.state();
        let snapshot = &mut state.snapshot;

        if snapshot.is_loading {
            debug!("page load already in progress, skipping");
            return None;
        }
        if needs_next_page && !snapshot.has_next_page {
            debug!("no further page, skipping");
            return None;
        }

        snapshot.is_loading = true;
        snapshot.error = None;
        Some((state.epoch, state.snapshot.sort_by))
    }

    fn finish(
        &self,
        epoch: u64,
        outcome: Result<PokemonConnection>,
        replace: bool,
    ) -> Result<LoadOutcome> {
        let mut state = self.state();
        if state.epoch != epoch {
            debug!("dropping page loaded for a previous sort order");
            return Ok(LoadOutcome::Skipped);
        }

        let snapshot = &mut state.snapshot;
        snapshot.is_loading = false;

        match outcome {
            Ok(page) => {
                let count = snapshot.apply_page(page, replace);
                debug!(
                    count,
                    loaded = snapshot.items.len(),
                    total = ?snapshot.total_count,
                    "catalog page loaded"
                );
                Ok(LoadOutcome::Loaded(count))
            }
            Err(err) => {
                warn!(error = %err, "catalog page failed to load");
                snapshot.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

impl ListSnapshot {
    fn apply_page(&mut self, page: PokemonConnection, replace: bool) -> usize {
        let count = page.edges.len();
        if replace {
            self.items.clear();
        }
        self.items.extend(page.edges.into_iter().map(|edge| edge.node));
        self.end_cursor = page.page_info.end_cursor;
        self.has_next_page = page.page_info.has_next_page;
        self.total_count = Some(page.total_count);
        self.error = None;
        count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;
    use crate::client::testing::ScriptedExecutor;
    use crate::models::GraphQlResponse;

    /// Three pages of two Pokémon each; `after` selects the page.
    fn paged_executor(delay_ms: u64) -> ScriptedExecutor {
        ScriptedExecutor::new(move |request| {
            let after = request.variables.get("after").and_then(Value::as_str);
            let sort = request.variables.get("sortBy").and_then(Value::as_str);
            let (ids, next): (Vec<i64>, Option<&str>) = match after {
                None => (vec![1, 2], Some("c2")),
                Some("c2") => (vec![3, 4], Some("c4")),
                Some(_) => (vec![5, 6], None),
            };
            let edges: Vec<Value> = ids
                .iter()
                .map(|id| {
                    let name = if sort == Some("name") {
                        format!("a-{}", id)
                    } else {
                        format!("poke-{}", id)
                    };
                    json!({
                        "node": { "id": id, "name": name, "number": id, "imageUrl": "u", "abilities": [] },
                        "cursor": format!("c{}", id)
                    })
                })
                .collect();
            let body = json!({
                "pokemons": {
                    "edges": edges,
                    "pageInfo": { "hasNextPage": next.is_some(), "endCursor": ids.last().map(|id| format!("c{}", id)) },
                    "totalCount": 6
                }
            });
            (Duration::from_millis(delay_ms), Ok(GraphQlResponse::from_data(body)))
        })
    }

    fn loader(executor: ScriptedExecutor) -> (ListLoader<ScriptedExecutor>, Arc<ScriptedExecutor>) {
        let executor = Arc::new(executor);
        let loader = ListLoader::new(
            PokedexClient::from_shared(Arc::clone(&executor)),
            2,
            SortBy::Number,
        );
        (loader, executor)
    }

    fn ids(snapshot: &ListSnapshot) -> Vec<i64> {
        snapshot.items.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_load_first_page() {
        let (loader, executor) = loader(paged_executor(0));

        let outcome = loader.load_first_page().await.unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded(2));
        let snapshot = loader.snapshot();
        assert_eq!(ids(&snapshot), vec![1, 2]);
        assert_eq!(snapshot.total_count, Some(6));
        assert!(snapshot.has_next_page);
        assert!(!snapshot.is_loading);

        let call = &executor.calls()[0];
        assert_eq!(call.variables["first"], json!(2));
        assert_eq!(call.variables["sortBy"], json!("number"));
        assert!(call.variables.get("after").is_none());
    }

    #[tokio::test]
    async fn test_load_more_appends_in_order_until_exhausted() {
        let (loader, executor) = loader(paged_executor(0));

        loader.load_first_page().await.unwrap();
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(2));
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Loaded(2));

        let snapshot = loader.snapshot();
        assert_eq!(ids(&snapshot), vec![1, 2, 3, 4, 5, 6]);
        assert!(!snapshot.has_next_page);

        // No next page: no request
        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(executor.call_count(), 3);
        assert_eq!(executor.calls()[1].variables["after"], json!("c2"));
    }

    #[tokio::test]
    async fn test_load_more_before_first_page_is_skipped() {
        let (loader, executor) = loader(paged_executor(0));

        assert_eq!(loader.load_more().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_while_loading_is_skipped() {
        let (loader, executor) = loader(paged_executor(50));
        loader.load_first_page().await.unwrap();

        let (first, second) = tokio::join!(loader.load_more(), loader.load_more());

        assert_eq!(first.unwrap(), LoadOutcome::Loaded(2));
        assert_eq!(second.unwrap(), LoadOutcome::Skipped);
        assert_eq!(executor.call_count(), 2);
        assert_eq!(ids(&loader.snapshot()), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_error_is_captured_and_items_kept() {
        let executor = ScriptedExecutor::new(|request| {
            if request.variables.get("after").is_some() {
                (Duration::ZERO, Err(PokedexError::Network("reset".to_string())))
            } else {
                let body = json!({ "pokemons": {
                    "edges": [{ "node": { "id": 1, "name": "bulbasaur", "number": 1, "imageUrl": "u" }, "cursor": "c1" }],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c1" },
                    "totalCount": 151
                }});
                (Duration::ZERO, Ok(GraphQlResponse::from_data(body)))
            }
        });
        let (loader, _) = loader(executor);

        loader.load_first_page().await.unwrap();
        let result = loader.load_more().await;

        assert_eq!(result, Err(PokedexError::Network("reset".to_string())));
        let snapshot = loader.snapshot();
        assert_eq!(ids(&snapshot), vec![1]);
        assert!(!snapshot.is_loading);
        assert!(snapshot.has_next_page, "a failed page can be retried");
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_sort_change_resets_list() {
        let (loader, executor) = loader(paged_executor(0));
        loader.load_first_page().await.unwrap();
        loader.load_more().await.unwrap();

        loader.set_sort_by(SortBy::Name);
        let snapshot = loader.snapshot();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_count, None);
        assert_eq!(snapshot.sort_by, SortBy::Name);

        loader.load_first_page().await.unwrap();
        assert_eq!(loader.snapshot().items[0].name, "a-1");
        assert_eq!(executor.calls()[2].variables["sortBy"], json!("name"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_for_previous_sort_is_dropped() {
        let (loader, _) = loader(paged_executor(50));

        let load = loader.load_first_page();
        let change = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            loader.set_sort_by(SortBy::Name);
        };
        let (outcome, _) = tokio::join!(load, change);

        assert_eq!(outcome.unwrap(), LoadOutcome::Skipped);
        let snapshot = loader.snapshot();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn test_with_page_seeds_list() {
        let page: PokemonConnection = serde_json::from_value(json!({
            "edges": [{ "node": { "id": 7, "name": "squirtle", "number": 7, "imageUrl": "u" }, "cursor": "c7" }],
            "pageInfo": { "hasNextPage": true, "endCursor": "c7" },
            "totalCount": 151
        }))
        .unwrap();

        let (loader, _) = loader(paged_executor(0));
        let loader = loader.with_page(page);

        let snapshot = loader.snapshot();
        assert_eq!(ids(&snapshot), vec![7]);
        assert_eq!(snapshot.end_cursor.as_deref(), Some("c7"));
    }
}
