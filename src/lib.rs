//! Appraiser derives a worth for every craftable entity in a recipe graph.
//!
//! Worth flows up from entities priced by category rules or manual
//! overrides, through recipes, to everything craftable from them. What the
//! solver cannot price is reported back so it can be priced by hand.

pub mod config;
pub mod error;
pub mod index;
pub mod matching;
pub mod pricing;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod solver;
pub mod tracker;
pub mod valuation;

pub use config::AppraiserConfig;
pub use error::{AppraiseError, AppraiseResult};
pub use matching::{MatchRules, MatchingRules};
pub use pricing::{PricingData, PricingReport};
pub use registry::{Entity, EntityId, Stack, Universe};
pub use solver::{DepthSolver, RecursionPath, SolveSummary};
pub use valuation::ValuationTable;
