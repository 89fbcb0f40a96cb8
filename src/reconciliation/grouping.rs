//! Partitioning of movements into periods bounded by balance checkpoints

use crate::types::*;

/// Split date-ascending movements into one group per pair of consecutive
/// balances.
///
/// A group holds every movement with `start.date <= date < end.date`, so a
/// movement dated on an inner checkpoint belongs to the period starting
/// there. Movements before the first balance or on/after the last one fall
/// in no group. Yields `balances.len() - 1` groups, none when fewer than two
/// balances are given.
///
/// Both slices must already be sorted by date.
pub fn group_by_period<'a>(
    movements: &'a [Movement],
    balances: &'a [Balance],
) -> Vec<MovementGroup<'a>> {
    let Some(first) = balances.first() else {
        return Vec::new();
    };

    // Movements dated before the first checkpoint are never reconciled.
    let mut cursor = movements.partition_point(|movement| movement.date < first.date);

    balances
        .windows(2)
        .map(|pair| {
            let (start, end) = (&pair[0], &pair[1]);
            let remaining = &movements[cursor..];
            let len = remaining.partition_point(|movement| movement.date < end.date);
            cursor += len;
            MovementGroup::new(&remaining[..len], start, end)
        })
        .collect()
}

/// Number of movements that no group covers
pub fn discarded_count(movements: &[Movement], groups: &[MovementGroup<'_>]) -> usize {
    let grouped: usize = groups.iter().map(|group| group.movements.len()).sum();
    movements.len() - grouped
}
