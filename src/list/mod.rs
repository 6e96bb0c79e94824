//! List Module
//!
//! Cursor-paginated loading of the full catalog.

mod loader;

pub use loader::{ListLoader, ListSnapshot, LoadOutcome};
