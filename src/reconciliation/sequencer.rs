//! Date ordering of raw statement input

use crate::types::*;

/// Return the movements sorted by ascending date.
///
/// The sort is stable: movements sharing a date keep their input order,
/// which fixes the order of ids reported in difference hints. The caller's
/// slice is left untouched.
pub fn sequence_movements(movements: &[Movement]) -> Vec<Movement> {
    let mut ordered = movements.to_vec();
    ordered.sort_by_key(|movement| movement.date);
    ordered
}

/// Return the balances sorted by ascending date, stable on equal dates.
pub fn sequence_balances(balances: &[Balance]) -> Vec<Balance> {
    let mut ordered = balances.to_vec();
    ordered.sort_by_key(|balance| balance.date);
    ordered
}
