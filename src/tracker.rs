//! Terminators and the ancestors that depended on them.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::registry::EntityId;

/// Records entities with no producing recipe as the solver reaches them
#[derive(Debug, Clone, Default)]
pub struct DependencyTracker {
    terminators: BTreeSet<EntityId>,
    dependents: HashMap<EntityId, HashSet<EntityId>>,
}

impl DependencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `terminator` and add every ancestor on the path to its dependents
    pub fn record_terminator<'a>(
        &mut self,
        terminator: &EntityId,
        ancestors: impl IntoIterator<Item = &'a EntityId>,
    ) {
        self.terminators.insert(terminator.clone());
        for ancestor in ancestors {
            self.dependents
                .entry(terminator.clone())
                .or_default()
                .insert(ancestor.clone());
        }
    }

    pub fn is_terminator(&self, entity: &str) -> bool {
        self.terminators.contains(entity)
    }

    /// All terminators, sorted by id
    pub fn terminators(&self) -> impl Iterator<Item = &EntityId> {
        self.terminators.iter()
    }

    pub fn dependents_of(&self, terminator: &str) -> Option<&HashSet<EntityId>> {
        self.dependents.get(terminator)
    }

    /// Terminators by number of dependents, most first; ties by id
    pub fn ranking(&self) -> Vec<(EntityId, usize)> {
        let mut ranking: Vec<(EntityId, usize)> = self
            .dependents
            .iter()
            .map(|(id, deps)| (id.clone(), deps.len()))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranking
    }
}
