//! API Module
//!
//! HTTP handlers and routing for the same-origin GraphQL proxy.
//!
//! # Endpoints
//! - `POST /api/graphql` - Forward a GraphQL operation upstream
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
