//! Worth bookkeeping shared by the solver and its consumers.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use crate::matching::MatchRules;
use crate::registry::{EntityId, EntityRegistry};

/// Manual worths keyed by entity; `None` marks an entry awaiting a value
pub type OverrideTable = BTreeMap<EntityId, Option<f64>>;

/// Match-cost, override and computed worths.
///
/// Match costs are authoritative: nothing the solver does replaces them, and
/// an override for a match-costed entity never takes effect.
#[derive(Debug, Clone, Default)]
pub struct ValuationTable {
    match_cost: HashMap<EntityId, f64>,
    overrides: HashMap<EntityId, f64>,
    computed: HashMap<EntityId, f64>,
}

impl ValuationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed match costs from `rules`, then every valued override for a
    /// registered entity.
    pub fn seeded(
        registry: &EntityRegistry,
        rules: &impl MatchRules,
        overrides: &OverrideTable,
    ) -> Self {
        let mut table = Self::new();

        for entity in registry.iter() {
            if let Some(worth) = rules.match_cost(entity) {
                if !rules.is_ignored(entity) {
                    debug!("Adding match cost: {} = {}", entity.id, worth);
                    table.seed_match_cost(entity.id.clone(), worth);
                }
            }
        }

        for (id, worth) in overrides {
            let Some(worth) = worth else { continue };
            if !registry.contains(id.as_str()) {
                warn!("Skipping override for unknown entity {}", id);
                continue;
            }
            table.seed_override(id.clone(), *worth);
        }

        info!(
            "Seeded {} match costs and {} overrides",
            table.match_cost.len(),
            table.overrides.len()
        );
        table
    }

    pub fn seed_match_cost(&mut self, entity: EntityId, worth: f64) {
        self.match_cost.insert(entity, worth);
    }

    /// Seed a manual worth. Ignored if the entity already has a match cost;
    /// otherwise it also primes the computed table. Returns whether it took.
    pub fn seed_override(&mut self, entity: EntityId, worth: f64) -> bool {
        if self.match_cost.contains_key(&entity) {
            return false;
        }
        self.computed.insert(entity.clone(), worth);
        self.overrides.insert(entity, worth);
        true
    }

    /// Computed worth if present, else match cost
    pub fn worth_of(&self, entity: &str) -> Option<f64> {
        self.computed
            .get(entity)
            .or_else(|| self.match_cost.get(entity))
            .copied()
    }

    /// Store a solver result, replacing any earlier one. Match-costed
    /// entities keep their match cost as the only source of truth.
    pub fn record_computed(&mut self, entity: EntityId, worth: f64) {
        if self.match_cost.contains_key(&entity) {
            return;
        }
        self.computed.insert(entity, worth);
    }

    pub fn computed(&self, entity: &str) -> Option<f64> {
        self.computed.get(entity).copied()
    }

    pub fn match_cost(&self, entity: &str) -> Option<f64> {
        self.match_cost.get(entity).copied()
    }

    pub fn has_match_cost(&self, entity: &str) -> bool {
        self.match_cost.contains_key(entity)
    }

    /// Override that took effect at seed time
    pub fn seeded_override(&self, entity: &str) -> Option<f64> {
        self.overrides.get(entity).copied()
    }

    /// Entities priced by match cost, sorted by id
    pub fn match_costed(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.match_cost.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn computed_count(&self) -> usize {
        self.computed.len()
    }
}
