//! Entity identities and stacks.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique identity of an entity, e.g. `minecraft:iron_ingot`.
///
/// Ordering is by the identity string, which is the presentation order used
/// in every persisted table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part of a `namespace:path` id (empty if there is none)
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map(|(ns, _)| ns).unwrap_or("")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A registered entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Category tags used by match-cost rules
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            tags: Vec::new(),
        }
    }

    /// Add a category tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A number of units of one entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stack {
    pub entity: EntityId,
    pub count: u32,
}

impl Stack {
    pub fn new(entity: impl Into<EntityId>, count: u32) -> Self {
        Self {
            entity: entity.into(),
            count,
        }
    }

    /// A single unit
    pub fn one(entity: impl Into<EntityId>) -> Self {
        Self::new(entity, 1)
    }
}
