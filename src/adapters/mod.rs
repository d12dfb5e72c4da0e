//! Adapters implementing the entity ports.

pub mod cache;
pub mod memory;
pub mod sqlite;
