//! GraphQL envelope types
//!
//! Request and response bodies of GraphQL-over-HTTP, independent of any operation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{PokedexError, Result};

/// Request body for a GraphQL operation
///
/// # Fields
/// - `query`: The operation document
/// - `variables`: Named variables, omitted when empty
/// - `operation_name`: Optional operation to run from a multi-operation document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
    #[serde(
        default,
        rename = "operationName",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    /// Creates a request without variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            operation_name: None,
        }
    }

    /// Adds a variable. Values that fail to serialize are logged and stored as null.
    pub fn variable(mut self, name: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            warn!(variable = name, error = %e, "GraphQL variable failed to serialize, sending null");
            Value::Null
        });
        self.variables.insert(name.to_string(), value);
        self
    }

    /// Drops null variables so the server applies its own defaults
    /// instead of rejecting an explicit null.
    pub fn without_null_variables(mut self) -> Self {
        self.variables.retain(|_, v| !v.is_null());
        self
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return Some("GraphQL query cannot be empty".to_string());
        }
        None
    }
}

/// A single entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }
}

/// Response body of a GraphQL operation: `{ data?, errors? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse<T = Value> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    pub fn from_data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<GraphQlError>) -> Self {
        Self { data: None, errors }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

impl GraphQlResponse<Value> {
    /// Converts the response into typed data.
    ///
    /// Any GraphQL error fails the whole operation; a response without
    /// `data` is treated as malformed.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if !self.errors.is_empty() {
            return Err(PokedexError::GraphQl(self.error_messages()));
        }
        let data = self.data.ok_or_else(|| {
            PokedexError::InvalidResponse("response contained no data".to_string())
        })?;
        Ok(serde_json::from_value(data)?)
    }
}
