//! Application layer: wiring configuration to concrete adapters.

pub mod resolver_factory;

pub use resolver_factory::{build_cache, build_resolver};
