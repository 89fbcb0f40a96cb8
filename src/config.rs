//! Configuration for the reconciliation engine

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Tunable behaviour of a [`ReconciliationEngine`](crate::ReconciliationEngine)
///
/// None of these options change which periods reconcile; they only shape
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Name the movements whose amount equals a period difference
    pub match_hints: bool,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self { match_hints: true }
    }
}

impl ReconciliationConfig {
    /// Load a configuration from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> ReconciliationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
