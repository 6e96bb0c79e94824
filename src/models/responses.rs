//! Response DTOs for the GraphQL proxy
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! relayed from upstream.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Upstream GraphQL endpoint the proxy forwards to
    pub upstream: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(upstream: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            upstream: upstream.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
