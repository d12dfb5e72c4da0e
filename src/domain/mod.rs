//! Domain layer for readthrough
//!
//! Entity model, configuration model, error types and the port traits the
//! resolver is written against.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CacheError, ResolveError, ResolveResult, StoreError};
