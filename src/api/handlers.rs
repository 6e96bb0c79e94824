//! API Handlers
//!
//! HTTP request handlers of the GraphQL proxy.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::error;

use crate::client::HttpExecutor;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{GraphQlRequest, HealthResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Executor pointed at the upstream GraphQL API
    pub upstream: HttpExecutor,
}

impl AppState {
    /// Creates a new AppState forwarding through `upstream`.
    pub fn new(upstream: HttpExecutor) -> Self {
        Self { upstream }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpExecutor::from_config(config)?))
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Handler for POST /api/graphql
///
/// Forwards the GraphQL body upstream with the caller's bearer token and
/// relays upstream status and body unchanged. A body that is not JSON is
/// answered with a 500 and a GraphQL `errors` array, whatever its content type.
pub async fn graphql_proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>)> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "GraphQL proxy received a malformed body");
        PokedexError::MalformedBody(e.to_string())
    })?;
    let request: GraphQlRequest = serde_json::from_value(body.clone())
        .map_err(|e| PokedexError::InvalidRequest(e.to_string()))?;
    if let Some(error_msg) = request.validate() {
        return Err(PokedexError::InvalidRequest(error_msg));
    }

    let (status, upstream_body) = state
        .upstream
        .forward(&body, bearer_token(&headers))
        .await
        .map_err(|err| {
            error!(error = %err, "GraphQL proxy error");
            err
        })?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(upstream_body)))
}

/// Handler for GET /health
///
/// Returns health status of the proxy.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.upstream.url()))
}
