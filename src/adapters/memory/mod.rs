//! In-memory adapters.

pub mod entity_store;

pub use entity_store::{sample_entities, InMemoryEntityStore};
