//! Background Tasks Module
//!
//! Long-lived tokio tasks owned by handles that abort them on drop.

pub mod debounce;

pub use debounce::Debouncer;
