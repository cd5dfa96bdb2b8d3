//! The closed universe of entities and the recipes between them.

mod entity;
mod recipe;

pub use entity::{Entity, EntityId, Stack};
pub use recipe::{IngredientSlot, Recipe};

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppraiseError, AppraiseResult};
use crate::index::RecipeIndex;

/// Read-only registry of every entity that exists
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    positions: HashMap<EntityId, usize>,
}

impl EntityRegistry {
    /// Build a registry, rejecting duplicate ids
    pub fn new(entities: Vec<Entity>) -> AppraiseResult<Self> {
        let mut positions = HashMap::with_capacity(entities.len());
        for (i, entity) in entities.iter().enumerate() {
            if positions.insert(entity.id.clone(), i).is_some() {
                return Err(AppraiseError::DuplicateEntity(entity.id.to_string()));
            }
        }
        Ok(Self {
            entities,
            positions,
        })
    }

    /// Look up an entity, failing for ids outside the registry
    pub fn get(&self, id: &str) -> AppraiseResult<&Entity> {
        self.positions
            .get(id)
            .map(|&i| &self.entities[i])
            .ok_or_else(|| AppraiseError::EntityNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Entities in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities sorted by id, for presentation
    pub fn sorted(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.entities.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// On-disk form of a universe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseFile {
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// A validated registry together with its indexed recipe set.
///
/// Both halves are read-only once built.
#[derive(Debug, Clone)]
pub struct Universe {
    pub registry: EntityRegistry,
    pub index: RecipeIndex,
}

impl Universe {
    /// Validate every recipe against the registry, then index them
    pub fn new(registry: EntityRegistry, recipes: Vec<Recipe>) -> AppraiseResult<Self> {
        for recipe in &recipes {
            recipe.validate(&registry)?;
        }
        Ok(Self {
            registry,
            index: RecipeIndex::new(recipes),
        })
    }

    pub fn from_file(file: UniverseFile) -> AppraiseResult<Self> {
        Self::new(EntityRegistry::new(file.entities)?, file.recipes)
    }

    pub fn from_json_str(json: &str) -> AppraiseResult<Self> {
        Self::from_file(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> AppraiseResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| AppraiseError::io(path, e))?;
        let universe = Self::from_json_str(&content)?;
        info!(
            "Loaded {} entities and {} recipes from {}",
            universe.registry.len(),
            universe.index.len(),
            path.display()
        );
        Ok(universe)
    }
}
