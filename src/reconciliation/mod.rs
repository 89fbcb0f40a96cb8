//! Reconciliation of bank movements against balance checkpoints
//!
//! A run orders its input by date, stops early when movement ids repeat,
//! then splits the movements into periods between consecutive balances and
//! checks each period's sum against the balance change.

pub mod duplicates;
pub mod grouping;
pub mod report;
pub mod sequencer;
pub mod validator;

pub use duplicates::*;
pub use grouping::*;
pub use report::*;
pub use sequencer::*;
pub use validator::*;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ReconciliationConfig;
use crate::traits::GroupValidator;
use crate::types::*;

/// Orchestrates a reconciliation run
///
/// The engine holds no state between runs and may be shared across threads.
pub struct ReconciliationEngine {
    config: ReconciliationConfig,
    validator: Box<dyn GroupValidator>,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self {
            config: ReconciliationConfig::default(),
            validator: Box::new(DefaultGroupValidator::new()),
        }
    }

    /// Create an engine from a configuration
    pub fn with_config(config: ReconciliationConfig) -> Self {
        Self {
            validator: Box::new(DefaultGroupValidator::from_config(&config)),
            config,
        }
    }

    /// Create an engine with a custom period rule
    pub fn with_validator(validator: Box<dyn GroupValidator>) -> Self {
        Self {
            config: ReconciliationConfig::default(),
            validator,
        }
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Validate movements against balances.
    ///
    /// Returns every business-rule violation found; an empty list means the
    /// statement reconciles. With fewer than two balances the result is
    /// exactly `[BalancesMissing]`, and when ids repeat it is exactly one
    /// `Duplicate` error. Neither input slice is modified.
    pub fn validate(&self, movements: &[Movement], balances: &[Balance]) -> Vec<ValidationError> {
        self.run(movements, balances).errors
    }

    /// Validate like [`validate`](Self::validate) and report per-period totals
    pub fn reconcile(&self, movements: &[Movement], balances: &[Balance]) -> ReconciliationReport {
        let outcome = self.run(movements, balances);
        ReconciliationReport {
            run_id: Uuid::new_v4(),
            reconciled_at: chrono::Utc::now(),
            movement_count: movements.len(),
            balance_count: balances.len(),
            periods: outcome.periods,
            discarded: outcome.discarded,
            errors: outcome.errors,
        }
    }

    fn run(&self, movements: &[Movement], balances: &[Balance]) -> RunOutcome {
        if balances.len() < 2 {
            warn!(balances = balances.len(), "At least two balances are required");
            return RunOutcome::halted(ValidationError::BalancesMissing);
        }

        info!(
            movements = movements.len(),
            balances = balances.len(),
            "Validation started"
        );

        let movements = sequence_movements(movements);
        let balances = sequence_balances(balances);

        // Per-period sums are meaningless once an id repeats
        if let Some(duplicate) = detect_duplicates(&movements) {
            warn!(ids = duplicate.details().unwrap_or_default(), "Duplicate movements found");
            return RunOutcome::halted(duplicate);
        }

        let groups = group_by_period(&movements, &balances);
        let mut errors = Vec::new();
        let mut periods = Vec::with_capacity(groups.len());

        for group in &groups {
            let summary = PeriodSummary::from_group(group);
            debug!(
                period = %summary.period,
                movements = summary.movement_count,
                total = %summary.total,
                expected = %summary.expected,
                "Checking period"
            );
            if let Some(error) = self.validator.validate_group(group) {
                debug!(period = %summary.period, %error, "Period does not reconcile");
                errors.push(error);
            }
            periods.push(summary);
        }

        let discarded = discarded_count(&movements, &groups);
        info!(
            periods = periods.len(),
            discarded,
            errors = errors.len(),
            "Validation finished"
        );

        RunOutcome {
            errors,
            periods,
            discarded,
        }
    }
}

struct RunOutcome {
    errors: Vec<ValidationError>,
    periods: Vec<PeriodSummary>,
    discarded: usize,
}

impl RunOutcome {
    fn halted(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
            periods: Vec::new(),
            discarded: 0,
        }
    }
}
