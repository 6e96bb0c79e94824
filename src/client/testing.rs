//! Scripted executor for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Executor;
use crate::error::Result;
use crate::models::{GraphQlRequest, GraphQlResponse, PreviewItem};

type Responder = dyn Fn(&GraphQlRequest) -> (Duration, Result<GraphQlResponse>) + Send + Sync;

/// Answers every request through a closure after an optional delay and
/// records what it was asked.
pub(crate) struct ScriptedExecutor {
    calls: Mutex<Vec<GraphQlRequest>>,
    responder: Box<Responder>,
}

impl ScriptedExecutor {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&GraphQlRequest) -> (Duration, Result<GraphQlResponse>) + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    pub(crate) fn calls(&self) -> Vec<GraphQlRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `query` variables of every recorded call, in order.
    pub(crate) fn queried_terms(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.variables.get("query").and_then(Value::as_str).map(String::from))
            .collect()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse> {
        self.calls.lock().unwrap().push(request.clone());
        let (delay, outcome) = (self.responder)(&request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

/// `searchPokemon` envelope holding `items`.
pub(crate) fn search_response(items: &[PreviewItem]) -> GraphQlResponse {
    GraphQlResponse::from_data(json!({ "searchPokemon": items }))
}

pub(crate) fn pikachu() -> PreviewItem {
    PreviewItem::new(25, "pikachu", "https://img/25.png")
}
