//! GraphQL executors
//!
//! The `Executor` trait is the seam between the search/list logic and the
//! transport. `HttpExecutor` is the reqwest-backed implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{GraphQlRequest, GraphQlResponse};

/// Default user agent.
const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

// == Executor Trait ==
/// Executes one GraphQL operation and returns its `{ data?, errors? }` envelope.
///
/// Implementations own transport and authentication. GraphQL-level errors
/// are returned inside the envelope; only transport failures are `Err`.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse> {
        (**self).execute(request).await
    }
}

// == HTTP Executor ==
/// GraphQL-over-HTTP executor.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpExecutor {
    /// Creates an executor posting to `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| PokedexError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
            token: None,
        })
    }

    /// Creates an executor from configuration, including the fallback token.
    pub fn from_config(config: &Config) -> Result<Self> {
        let executor = Self::new(config.graphql_url.clone(), config.timeout())?;
        Ok(match &config.auth_token {
            Some(token) => executor.with_token(token.clone()),
            None => executor,
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    // == Forward ==
    /// Relays a raw JSON body upstream and returns upstream status and JSON body.
    ///
    /// `bearer` overrides the executor's own token.
    pub async fn forward(&self, body: &Value, bearer: Option<&str>) -> Result<(u16, Value)> {
        let mut request = self.http.post(&self.url).json(body);
        if let Some(token) = bearer.or(self.token.as_deref()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body: Value = response.json().await?;

        debug!(status, url = %self.url, "upstream GraphQL response");
        Ok((status, body))
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse> {
        let request = request.without_null_variables();

        let mut builder = self.http.post(&self.url).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %self.url, "GraphQL request failed");
            return Err(PokedexError::Http {
                status: status.as_u16(),
                message: format!(
                    "GraphQL request failed: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            });
        }

        let envelope: GraphQlResponse = response.json().await?;
        if !envelope.errors.is_empty() {
            warn!(errors = ?envelope.error_messages(), "GraphQL errors");
        }
        Ok(envelope)
    }
}
