use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::common::{EntityId, Identifiable, NamedEntity};

const DEFAULT_SCENARIO_NAME: &str = "default";

/// A financial profile owned by a user. Fields this crate does not interpret
/// are kept in `extra` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

impl Identifiable for Profile {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A named "what-if" budget plan grouping recurring events under a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(default, alias = "profileID", skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<EntityId>,
}

impl Scenario {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            is_default: None,
            profile_id: None,
        }
    }

    /// The default plan is recognised by name, case-insensitively.
    pub fn is_named_default(&self) -> bool {
        self.name.eq_ignore_ascii_case(DEFAULT_SCENARIO_NAME)
    }
}

impl Identifiable for Scenario {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl NamedEntity for Scenario {
    fn name(&self) -> &str {
        &self.name
    }
}
