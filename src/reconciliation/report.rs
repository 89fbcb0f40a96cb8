//! Detailed outcome of a reconciliation run

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::types::{wire_decimal, *};

/// Totals of one reconciled period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub movement_count: usize,
    /// Sum of movement amounts in the period
    #[serde(serialize_with = "wire_decimal::serialize")]
    pub total: BigDecimal,
    /// Balance change between the bounding checkpoints
    #[serde(serialize_with = "wire_decimal::serialize")]
    pub expected: BigDecimal,
}

impl PeriodSummary {
    pub fn from_group(group: &MovementGroup<'_>) -> Self {
        Self {
            period: group.period(),
            movement_count: group.movements.len(),
            total: group.total(),
            expected: group.expected_change(),
        }
    }

    pub fn is_reconciled(&self) -> bool {
        self.total == self.expected
    }
}

/// Full report of a reconciliation run
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    /// Identifier of this run, for correlating logs
    pub run_id: Uuid,
    pub reconciled_at: DateTime<Utc>,
    pub movement_count: usize,
    pub balance_count: usize,
    /// One entry per checkpoint pair; empty when the run stopped before grouping
    pub periods: Vec<PeriodSummary>,
    /// Movements dated outside the checkpoint range
    pub discarded: usize,
    pub errors: Vec<ValidationError>,
}

impl ReconciliationReport {
    pub fn is_reconciled(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        if self.is_reconciled() {
            format!(
                "Reconciled {} movements over {} periods ({} outside checkpoint range)",
                self.movement_count,
                self.periods.len(),
                self.discarded
            )
        } else {
            let findings = self
                .errors
                .iter()
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            format!("Reconciliation failed with {} error(s): {}", self.errors.len(), findings)
        }
    }
}
