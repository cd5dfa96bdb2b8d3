//! Crafting recipes.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, Stack};
use super::EntityRegistry;
use crate::error::{AppraiseError, AppraiseResult};

/// One recipe position: any of the alternatives satisfies it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSlot {
    /// Acceptable stacks, in the order they are tried
    pub alternatives: Vec<Stack>,
}

impl IngredientSlot {
    /// A slot accepting exactly one entity
    pub fn single(entity: impl Into<EntityId>, count: u32) -> Self {
        Self {
            alternatives: vec![Stack::new(entity, count)],
        }
    }

    /// A slot accepting any of several entities (e.g. members of a tag)
    pub fn any_of<I, E>(entities: I, count: u32) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<EntityId>,
    {
        Self {
            alternatives: entities
                .into_iter()
                .map(|e| Stack::new(e, count))
                .collect(),
        }
    }
}

/// A production rule: ingredient slots in, one output stack out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: Vec<IngredientSlot>,
    pub output: Stack,
}

impl Recipe {
    /// Create a recipe with no ingredients yet
    pub fn new(output: impl Into<EntityId>, count: u32) -> Self {
        Self {
            ingredients: Vec::new(),
            output: Stack::new(output, count),
        }
    }

    /// Add a single-entity ingredient
    pub fn with_ingredient(mut self, entity: impl Into<EntityId>, count: u32) -> Self {
        self.ingredients.push(IngredientSlot::single(entity, count));
        self
    }

    /// Add an ingredient slot with alternatives
    pub fn with_slot(mut self, slot: IngredientSlot) -> Self {
        self.ingredients.push(slot);
        self
    }

    /// Check counts and that every referenced entity is registered
    pub fn validate(&self, registry: &EntityRegistry) -> AppraiseResult<()> {
        let invalid = |reason: String| AppraiseError::InvalidRecipe {
            output: self.output.entity.to_string(),
            reason,
        };

        registry.get(self.output.entity.as_str())?;
        if self.output.count == 0 {
            return Err(invalid("output count is zero".to_string()));
        }

        for (i, slot) in self.ingredients.iter().enumerate() {
            if slot.alternatives.is_empty() {
                return Err(invalid(format!("slot {} has no alternatives", i)));
            }
            for alt in &slot.alternatives {
                registry.get(alt.entity.as_str())?;
                if alt.count == 0 {
                    return Err(invalid(format!(
                        "slot {} requires zero of {}",
                        i, alt.entity
                    )));
                }
            }
        }

        Ok(())
    }
}
