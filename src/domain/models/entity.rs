//! Entity domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque identifier of an entity.
///
/// Serialized untagged, so `1` and `"abc"` are both valid identifiers on the
/// wire. The integer `0` and the empty string are blank and never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Whether this identifier is blank (`0` or `""`).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
        }
    }

    /// Parse user input, preferring the numeric form when it fits.
    pub fn parse_str(s: &str) -> Self {
        s.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// An identifier-keyed record resolved through the cache and the store.
///
/// Only `id` is structural. Every other field (`name`, `email` or anything
/// else the domain defines) lives in `fields`, is flattened into the same JSON
/// object and keeps its insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entity {
    /// An entity carrying nothing but its identifier.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// A user record with `name` and `email`, the shape of the sample data.
    pub fn user(id: impl Into<EntityId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(id)
            .with_field("name", Value::String(name.into()))
            .with_field("email", Value::String(email.into()))
    }

    /// Set a field. `id` is structural and cannot be overwritten this way.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "id" {
            self.fields.insert(key, value.into());
        }
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `name` field, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// The `email` field, when present and a string.
    pub fn email(&self) -> Option<&str> {
        self.field("email").and_then(Value::as_str)
    }
}
