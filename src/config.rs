//! Configuration Module
//!
//! Handles loading and managing client and proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_TTL_SECS};

/// Default upstream GraphQL endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8082/graphql";

/// Client, search and proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream GraphQL endpoint
    pub graphql_url: String,
    /// HTTP port of the GraphQL proxy
    pub server_port: u16,
    /// Upstream request timeout in seconds
    pub request_timeout: u64,
    /// Quiescence window of the search debouncer in milliseconds
    pub debounce_ms: u64,
    /// Minimum trimmed query length before a search is issued
    pub min_query_length: usize,
    /// Maximum number of cached search queries
    pub search_cache_capacity: usize,
    /// Lifetime of a cached search result in seconds
    pub search_cache_ttl: u64,
    /// Number of Pokémon requested per page
    pub page_size: u32,
    /// Bearer token used when the caller does not provide one
    pub auth_token: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GRAPHQL_URL` - Upstream GraphQL endpoint (default: http://localhost:8082/graphql)
    /// - `SERVER_PORT` - Proxy HTTP port (default: 3000)
    /// - `REQUEST_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `SEARCH_DEBOUNCE_MS` - Debounce window (default: 350)
    /// - `SEARCH_MIN_QUERY_LENGTH` - Minimum query length (default: 2)
    /// - `SEARCH_CACHE_CAPACITY` - Cached queries (default: 50)
    /// - `SEARCH_CACHE_TTL` - Cache lifetime in seconds (default: 300)
    /// - `PAGE_SIZE` - Pokémon per page (default: 20)
    /// - `AUTH_TOKEN` - Fallback bearer token (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            graphql_url: env::var("GRAPHQL_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.graphql_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            debounce_ms: parse_var("SEARCH_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms),
            min_query_length: parse_var("SEARCH_MIN_QUERY_LENGTH")
                .unwrap_or(defaults.min_query_length),
            search_cache_capacity: parse_var("SEARCH_CACHE_CAPACITY")
                .unwrap_or(defaults.search_cache_capacity),
            search_cache_ttl: parse_var("SEARCH_CACHE_TTL").unwrap_or(defaults.search_cache_ttl),
            page_size: parse_var("PAGE_SIZE").unwrap_or(defaults.page_size),
            auth_token: env::var("AUTH_TOKEN").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Debounce window as a Duration.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Cache lifetime as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.search_cache_ttl)
    }

    /// Upstream timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            server_port: 3000,
            request_timeout: 10,
            debounce_ms: 350,
            min_query_length: 2,
            search_cache_capacity: DEFAULT_CAPACITY,
            search_cache_ttl: DEFAULT_TTL_SECS,
            page_size: 20,
            auth_token: None,
        }
    }
}
