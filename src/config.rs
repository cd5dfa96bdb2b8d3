use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppraiseError, AppraiseResult};

/// Default depth guard: an ingredient is skipped once more than this many
/// ancestors sit on the recursion path.
pub const DEFAULT_MAX_DEPTH: usize = 24;

/// Top-level appraiser configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppraiserConfig {
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum ancestors permitted on the path before alternatives are skipped
    pub max_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the pricing report is written
    pub report_path: String,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Print the per-entity worth listing after solving
    pub show_results: bool,
}

impl AppraiserConfig {
    pub fn from_file(path: impl AsRef<Path>) -> AppraiseResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| AppraiseError::io(path, e))?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppraiseResult<()> {
        if self.output.report_path.trim().is_empty() {
            return Err(AppraiseError::InvalidConfig(
                "output.report_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "pricing_report.json".to_string(),
            pretty: true,
            show_results: false,
        }
    }
}
