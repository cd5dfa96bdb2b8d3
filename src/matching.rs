//! Match-cost rules: worths assigned by category rather than derived.
//!
//! A pattern is one of:
//! - `#tag` matches every entity carrying `tag`
//! - `namespace:*` matches every entity in `namespace`
//! - anything else matches one entity id exactly

use serde::{Deserialize, Serialize};

use crate::error::{AppraiseError, AppraiseResult};
use crate::registry::Entity;

/// Evaluates category worths and the ignore list for entities
pub trait MatchRules {
    /// Worth assigned by the first rule matching `entity`
    fn match_cost(&self, entity: &Entity) -> Option<f64>;

    /// Whether `entity` is excluded from pricing altogether
    fn is_ignored(&self, entity: &Entity) -> bool;
}

/// A single `pattern = worth` rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRule {
    pub pattern: String,
    pub worth: f64,
}

/// Rule set stored alongside the override table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingRules {
    /// Tried in declaration order; first match wins
    #[serde(default)]
    pub rules: Vec<MatchRule>,
    #[serde(default)]
    pub ignored: Vec<String>,
}

impl MatchingRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worth rule
    pub fn with_rule(mut self, pattern: impl Into<String>, worth: f64) -> Self {
        self.rules.push(MatchRule {
            pattern: pattern.into(),
            worth,
        });
        self
    }

    /// Add an ignore pattern
    pub fn with_ignored(mut self, pattern: impl Into<String>) -> Self {
        self.ignored.push(pattern.into());
        self
    }

    /// Reject negative or non-finite worths
    pub fn validate(&self) -> AppraiseResult<()> {
        for rule in &self.rules {
            if !rule.worth.is_finite() || rule.worth < 0.0 {
                return Err(AppraiseError::InvalidConfig(format!(
                    "match rule {} has invalid worth {}",
                    rule.pattern, rule.worth
                )));
            }
        }
        Ok(())
    }
}

impl MatchRules for MatchingRules {
    fn match_cost(&self, entity: &Entity) -> Option<f64> {
        self.rules
            .iter()
            .find(|rule| pattern_matches(&rule.pattern, entity))
            .map(|rule| rule.worth)
    }

    fn is_ignored(&self, entity: &Entity) -> bool {
        self.ignored.iter().any(|p| pattern_matches(p, entity))
    }
}

fn pattern_matches(pattern: &str, entity: &Entity) -> bool {
    if let Some(tag) = pattern.strip_prefix('#') {
        entity.has_tag(tag)
    } else if let Some(namespace) = pattern.strip_suffix(":*") {
        entity.id.namespace() == namespace
    } else {
        entity.id.as_str() == pattern
    }
}
