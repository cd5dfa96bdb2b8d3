//! Human-readable listing of solved worths.

use crate::registry::EntityRegistry;
use crate::valuation::ValuationTable;

/// One line per entity, sorted by id: the id padded to 50 columns and its
/// computed worth, or `-` when the solver found none.
pub fn show_results(registry: &EntityRegistry, valuation: &ValuationTable) -> Vec<String> {
    registry
        .sorted()
        .into_iter()
        .map(|entity| {
            let worth = valuation
                .computed(entity.id.as_str())
                .map(|w| format!("{:.3}", w))
                .unwrap_or_else(|| "-".to_string());
            format!("Item: {:<50} - {}", entity.id.as_str(), worth)
        })
        .collect()
}
