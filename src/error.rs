//! Error types for the Pokédex client
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the client, the search pipeline and the proxy.
///
/// Payloads are plain strings so the error can be cloned into the state
/// snapshots handed to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success HTTP status
    #[error("Upstream returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The GraphQL response carried an `errors` array
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Login was rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Request body that is not valid JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PokedexError {
    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            PokedexError::Network(msg)
            | PokedexError::InvalidResponse(msg)
            | PokedexError::MalformedBody(msg)
            | PokedexError::Auth(msg)
            | PokedexError::InvalidRequest(msg)
            | PokedexError::Internal(msg) => msg.clone(),
            PokedexError::Http { message, .. } => message.clone(),
            PokedexError::GraphQl(messages) => messages.join("; "),
        }
    }
}

// == Conversions ==
impl From<reqwest::Error> for PokedexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PokedexError::Network("request timed out".to_string())
        } else if err.is_decode() {
            PokedexError::InvalidResponse(err.to_string())
        } else {
            PokedexError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PokedexError {
    fn from(err: serde_json::Error) -> Self {
        PokedexError::InvalidResponse(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for PokedexError {
    fn into_response(self) -> Response {
        let status = match &self {
            PokedexError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PokedexError::Auth(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // GraphQL clients expect an `errors` array even on failure
        let body = Json(json!({
            "errors": [{ "message": self.message() }]
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, PokedexError>;
