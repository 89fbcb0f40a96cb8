//! Per-period balance checks

use bigdecimal::BigDecimal;

use crate::config::ReconciliationConfig;
use crate::traits::GroupValidator;
use crate::types::*;

/// Prefix of the hint naming movements that match a period difference
pub const MATCH_HINT_PREFIX: &str = "The following movements match the difference: ";

/// Default period rule: movements must explain the balance change exactly
///
/// No tolerance is applied; amounts are compared as exact decimals.
#[derive(Debug, Clone)]
pub struct DefaultGroupValidator {
    match_hints: bool,
}

impl Default for DefaultGroupValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultGroupValidator {
    /// Create a validator that reports matching-movement hints
    pub fn new() -> Self {
        Self { match_hints: true }
    }

    /// Create a validator that leaves `details` empty on differences
    pub fn without_hints() -> Self {
        Self { match_hints: false }
    }

    pub fn from_config(config: &ReconciliationConfig) -> Self {
        Self {
            match_hints: config.match_hints,
        }
    }
}

impl GroupValidator for DefaultGroupValidator {
    fn validate_group(&self, group: &MovementGroup<'_>) -> Option<ValidationError> {
        let difference = group.total() - group.expected_change();
        let zero = BigDecimal::from(0);
        if difference == zero {
            return None;
        }

        // Movements sum higher than the balance moved: a withdrawal is missing
        let kind = if difference > zero {
            DifferenceKind::Withdrawal
        } else {
            DifferenceKind::Deposit
        };
        let details = self
            .match_hints
            .then(|| matching_hint(group.movements, &difference));

        Some(ValidationError::Difference {
            kind,
            period: group.period(),
            difference,
            details,
        })
    }
}

/// Ids of movements whose signed amount equals `difference`, in group order
pub fn matching_movement_ids(movements: &[Movement], difference: &BigDecimal) -> Vec<MovementId> {
    movements
        .iter()
        .filter(|movement| movement.amount == *difference)
        .map(|movement| movement.id)
        .collect()
}

fn matching_hint(movements: &[Movement], difference: &BigDecimal) -> String {
    let ids = matching_movement_ids(movements, difference);
    if ids.is_empty() {
        return String::new();
    }

    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{MATCH_HINT_PREFIX}{joined}")
}
