//! Recipes grouped by the entity they produce.

use std::collections::HashMap;

use crate::registry::{EntityId, Recipe};

/// Immutable lookup from output entity to the recipes producing it
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: Vec<Recipe>,
    by_output: HashMap<EntityId, Vec<usize>>,
}

impl RecipeIndex {
    /// Group a recipe set by output, keeping the set's order within each group
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut by_output: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (i, recipe) in recipes.iter().enumerate() {
            by_output
                .entry(recipe.output.entity.clone())
                .or_default()
                .push(i);
        }
        Self { recipes, by_output }
    }

    /// Every recipe whose output is `entity` (possibly none)
    pub fn recipes_producing(&self, entity: &str) -> Vec<&Recipe> {
        self.by_output
            .get(entity)
            .map(|ids| ids.iter().map(|&i| &self.recipes[i]).collect())
            .unwrap_or_default()
    }

    pub fn has_recipes(&self, entity: &str) -> bool {
        self.by_output.contains_key(entity)
    }

    pub fn all(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_alternatives_in_order() {
        let index = RecipeIndex::new(vec![
            Recipe::new("a:torch", 4).with_ingredient("a:coal", 1),
            Recipe::new("a:stick", 4).with_ingredient("a:plank", 2),
            Recipe::new("a:torch", 2).with_ingredient("a:charcoal", 1),
        ]);

        let torches = index.recipes_producing("a:torch");
        assert_eq!(torches.len(), 2);
        assert_eq!(torches[0].output.count, 4);
        assert_eq!(torches[1].output.count, 2);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_unproduced_entity_has_no_recipes() {
        let index = RecipeIndex::new(vec![Recipe::new("a:stick", 4).with_ingredient("a:plank", 2)]);
        assert!(index.recipes_producing("a:plank").is_empty());
        assert!(!index.has_recipes("a:plank"));
        assert!(index.has_recipes("a:stick"));
    }
}
