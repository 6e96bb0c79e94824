//! Pokédex - Client for a GraphQL Pokémon catalog
//!
//! Provides debounced, cached autocomplete search, cursor-paginated catalog
//! loading and a same-origin GraphQL proxy.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod list;
pub mod models;
pub mod search;
pub mod tasks;

pub use api::AppState;
pub use cache::{QueryCache, SharedQueryCache};
pub use client::{Executor, HttpExecutor, PokedexClient};
pub use config::Config;
pub use error::{PokedexError, Result};
pub use list::ListLoader;
pub use search::{SearchOrchestrator, SearchSettings};
