//! Depth-first recipe cost solver.
//!
//! Walks the recipe graph from each entity down through its ingredients,
//! pricing every recipe that can be fully resolved and keeping the cheapest.
//! Results are memoized in the [`ValuationTable`]; entities with no recipe
//! are recorded as terminators along with the ancestors that reached them.
//!
//! Recursion is bounded two ways. An ingredient already on the path is
//! skipped (cycle guard), and once the path holds more than `max_depth`
//! ancestors every ingredient is skipped (depth guard). Either way the slot
//! just fails to resolve through that alternative.

mod path;

pub use path::{PathNode, RecursionPath};

use tracing::{debug, info, trace};

use crate::config::SolverConfig;
use crate::error::AppraiseResult;
use crate::registry::{IngredientSlot, Recipe, Stack, Universe};
use crate::tracker::DependencyTracker;
use crate::valuation::{OverrideTable, ValuationTable};

/// Counts from one pass over the whole registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveSummary {
    /// Entities with at least one recipe
    pub attempted: usize,
    /// Of those, how many got a worth
    pub solved: usize,
    /// Entities left without a derivable or manual worth
    pub unsolved: usize,
}

/// One solve session over a universe.
///
/// Owns all mutable state of the pass; the universe is only read.
pub struct DepthSolver<'u> {
    universe: &'u Universe,
    valuation: ValuationTable,
    tracker: DependencyTracker,
    max_depth: usize,
}

impl<'u> DepthSolver<'u> {
    /// Create a solver over a seeded valuation table
    pub fn new(universe: &'u Universe, valuation: ValuationTable, config: &SolverConfig) -> Self {
        Self {
            universe,
            valuation,
            tracker: DependencyTracker::new(),
            max_depth: config.max_depth,
        }
    }

    pub fn valuation(&self) -> &ValuationTable {
        &self.valuation
    }

    pub fn tracker(&self) -> &DependencyTracker {
        &self.tracker
    }

    pub fn universe(&self) -> &'u Universe {
        self.universe
    }

    /// Worth of an entity, if one is known
    pub fn worth_of(&self, entity: &str) -> Option<f64> {
        self.valuation.worth_of(entity)
    }

    /// Like [`worth_of`](Self::worth_of) but fails for ids outside the registry
    pub fn worth_of_id(&self, entity: &str) -> AppraiseResult<Option<f64>> {
        self.universe.registry.get(entity)?;
        Ok(self.valuation.worth_of(entity))
    }

    /// Price `target` given the ancestors currently being resolved.
    ///
    /// Returns the per-unit worth of the cheapest fully resolved recipe and
    /// records it, or `None` if no recipe resolved.
    pub fn solve(&mut self, target: &Stack, path: RecursionPath<'_>) -> Option<f64> {
        let universe = self.universe;
        let recipes = universe.index.recipes_producing(target.entity.as_str());
        trace!(depth = path.len(), "Solving {}", target.entity);

        if recipes.is_empty() {
            self.tracker.record_terminator(&target.entity, path.entities());
            return None;
        }

        let node = path.extend(target);
        let child = node.path();

        let mut best: Option<f64> = None;
        for recipe in recipes {
            if let Some(cost) = self.recipe_cost(recipe, path, child) {
                best = Some(best.map_or(cost, |b| b.min(cost)));
            }
        }

        if let Some(worth) = best {
            trace!(depth = path.len(), "Resolved {} at {}", target.entity, worth);
            self.valuation.record_computed(target.entity.clone(), worth);
        }
        best
    }

    /// Per-unit cost of one recipe, or `None` if any slot failed.
    ///
    /// Every slot is attempted even after a failure so that terminators and
    /// memoized ingredient worths are recorded the same way regardless of
    /// slot order.
    fn recipe_cost(
        &mut self,
        recipe: &Recipe,
        path: RecursionPath<'_>,
        child: RecursionPath<'_>,
    ) -> Option<f64> {
        let mut running = 0.0;
        let mut unresolved = 0;

        for slot in &recipe.ingredients {
            match self.slot_cost(slot, path, child) {
                Some(cost) => running += cost,
                None => unresolved += 1,
            }
        }

        if unresolved > 0 {
            return None;
        }
        Some(running / f64::from(recipe.output.count))
    }

    /// Cost of the first alternative in the slot that resolves
    fn slot_cost(
        &mut self,
        slot: &IngredientSlot,
        path: RecursionPath<'_>,
        child: RecursionPath<'_>,
    ) -> Option<f64> {
        for option in &slot.alternatives {
            if path.contains(&option.entity) || path.len() > self.max_depth {
                continue;
            }

            let known = self
                .valuation
                .computed(option.entity.as_str())
                .or_else(|| self.valuation.match_cost(option.entity.as_str()));
            let unit = match known {
                Some(worth) => Some(worth),
                None => self.solve(option, child),
            };

            if let Some(unit) = unit {
                return Some(unit * f64::from(option.count));
            }
        }
        None
    }

    /// Solve every registry entity that has a recipe.
    ///
    /// An entity with recipes counts as unsolved when no worth was found and
    /// `overrides` holds no value for it. An entity with no recipe always
    /// counts as unsolved, whether or not an override prices it.
    pub fn solve_all(&mut self, overrides: &OverrideTable) -> SolveSummary {
        let universe = self.universe;
        let mut summary = SolveSummary::default();

        for entity in universe.registry.iter() {
            if !universe.index.has_recipes(entity.id.as_str()) {
                summary.unsolved += 1;
                continue;
            }

            summary.attempted += 1;
            let stack = Stack::one(entity.id.clone());
            match self.solve(&stack, RecursionPath::empty()) {
                Some(_) => summary.solved += 1,
                None => {
                    let has_override = overrides.get(&entity.id).copied().flatten().is_some();
                    if !has_override {
                        debug!("Could not solve {}", entity.id);
                        summary.unsolved += 1;
                    }
                }
            }
        }

        info!(
            "Solved {}/{} craftable entities, {} unsolved, {} terminators",
            summary.solved,
            summary.attempted,
            summary.unsolved,
            self.tracker.terminators().count()
        );
        summary
    }

    /// Give up the session state
    pub fn into_parts(self) -> (ValuationTable, DependencyTracker) {
        (self.valuation, self.tracker)
    }
}

#[cfg(test)]
mod tests;
