//! Data models for the Pokédex client
//!
//! This module defines the GraphQL envelope, the catalog objects and the
//! DTOs served by the proxy.

pub mod graphql;
pub mod pokemon;
pub mod responses;

// Re-export commonly used types
pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse};
pub use pokemon::{
    Ability, AuthPayload, Form, Move, PageInfo, PokemonConnection, PokemonDetails, PokemonEdge,
    PokemonSummary, PreviewItem, SortBy,
};
pub use responses::HealthResponse;
