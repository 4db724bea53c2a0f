use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque backend identifier. The API hands out both integer and string ids,
/// so both are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => EntityId(text),
            Raw::Signed(number) => EntityId(number.to_string()),
            Raw::Unsigned(number) => EntityId(number.to_string()),
        })
    }
}

/// Identifies entities that expose a stable backend identifier.
pub trait Identifiable {
    fn id(&self) -> &EntityId;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &EntityId) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
