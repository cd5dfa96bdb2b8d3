//! Persisted pricing tables and the report written after each pass.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppraiseError, AppraiseResult};
use crate::matching::MatchingRules;
use crate::registry::EntityId;
use crate::valuation::OverrideTable;

/// Manually maintained pricing data.
///
/// Maps are ordered by entity id so the file stays stable across passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingData {
    /// Manual worths; `null` entries await a value
    #[serde(default)]
    pub overrides: OverrideTable,
    /// Entities nothing prices that could be priced by hand
    #[serde(default)]
    pub optional: BTreeMap<EntityId, Option<f64>>,
    #[serde(default)]
    pub matching: MatchingRules,
}

impl PricingData {
    pub fn load(path: impl AsRef<Path>) -> AppraiseResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| AppraiseError::io(path, e))?;
        let data: Self = serde_json::from_str(&content)?;
        data.validate()?;
        info!(
            "Loaded {} overrides and {} match rules from {}",
            data.overrides.len(),
            data.matching.rules.len(),
            path.display()
        );
        Ok(data)
    }

    /// Load `path`, or start empty if it does not exist yet
    pub fn load_or_default(path: impl AsRef<Path>) -> AppraiseResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No pricing data at {}, starting empty", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> AppraiseResult<()> {
        write_json(path.as_ref(), self, pretty)
    }

    pub fn validate(&self) -> AppraiseResult<()> {
        self.matching.validate()?;
        for (id, worth) in &self.overrides {
            if let Some(w) = worth {
                if !w.is_finite() || *w < 0.0 {
                    return Err(AppraiseError::InvalidConfig(format!(
                        "override for {} has invalid worth {}",
                        id, w
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Bookkeeping produced by the reconciliation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingReport {
    /// Entities nothing could price, see `SolveSummary::unsolved`
    pub unsolved: usize,
    /// Entities whose override a match cost made unnecessary, sorted
    pub redundant: Vec<EntityId>,
    /// Terminators with their dependent counts, most depended-on first
    pub deps: Vec<(EntityId, usize)>,
    /// Terminators folded into the override table, sorted
    pub terminators: Vec<EntityId>,
    pub generated_at: DateTime<Utc>,
}

impl PricingReport {
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> AppraiseResult<()> {
        write_json(path.as_ref(), self, pretty)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> AppraiseResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    std::fs::write(path, json).map_err(|e| AppraiseError::io(path, e))
}
