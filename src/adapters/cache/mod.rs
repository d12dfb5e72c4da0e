//! In-memory caching adapters.
//!
//! Uses `moka` for TTL-based concurrent caching behind the
//! `EntityCache` port.

pub mod moka_cache;

pub use moka_cache::MokaEntityCache;
