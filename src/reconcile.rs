//! Post-solve reconciliation of the persisted pricing tables.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info};

use crate::matching::MatchRules;
use crate::pricing::{PricingData, PricingReport};
use crate::registry::{EntityId, EntityRegistry};
use crate::solver::{DepthSolver, SolveSummary};
use crate::tracker::DependencyTracker;
use crate::valuation::ValuationTable;

/// Fold one finished pass into `data` and report on it.
///
/// Overrides that a match cost now covers are dropped, every other
/// terminator gets an override entry (its current worth, or `null`), and
/// the optional set is rebuilt from what is still unpriced.
pub fn reconcile(
    registry: &EntityRegistry,
    valuation: &ValuationTable,
    tracker: &DependencyTracker,
    rules: &impl MatchRules,
    data: &mut PricingData,
    summary: &SolveSummary,
) -> PricingReport {
    let redundant: BTreeSet<EntityId> = valuation.match_costed().into_iter().collect();

    let before = data.overrides.len();
    data.overrides.retain(|id, _| !redundant.contains(id));
    info!("Removed {} redundant overrides", before - data.overrides.len());

    let mut terminators = Vec::new();
    for terminator in tracker.terminators() {
        if redundant.contains(terminator) {
            continue;
        }
        debug!("Terminator: {}", terminator);
        data.overrides
            .insert(terminator.clone(), valuation.worth_of(terminator.as_str()));
        terminators.push(terminator.clone());
    }

    for entity in registry.sorted() {
        let unpriced = valuation.worth_of(entity.id.as_str()).is_none()
            && !redundant.contains(&entity.id)
            && !rules.is_ignored(entity);
        if unpriced {
            data.optional.insert(entity.id.clone(), None);
        } else {
            data.optional.remove(&entity.id);
        }
    }

    info!(
        "Reconciled: {} overrides, {} optional, {} terminators",
        data.overrides.len(),
        data.optional.len(),
        terminators.len()
    );

    PricingReport {
        unsolved: summary.unsolved,
        redundant: redundant.into_iter().collect(),
        deps: tracker.ranking(),
        terminators,
        generated_at: Utc::now(),
    }
}

impl DepthSolver<'_> {
    /// Run [`reconcile`] against this session's state
    pub fn reconcile(
        &self,
        rules: &impl MatchRules,
        data: &mut PricingData,
        summary: &SolveSummary,
    ) -> PricingReport {
        reconcile(
            &self.universe().registry,
            self.valuation(),
            self.tracker(),
            rules,
            data,
            summary,
        )
    }
}
