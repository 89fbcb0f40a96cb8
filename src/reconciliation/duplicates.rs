//! Detection of repeated movement identifiers

use std::collections::BTreeMap;

use crate::types::*;

/// Ids occurring more than once, in ascending numeric order
pub fn duplicate_ids(movements: &[Movement]) -> Vec<MovementId> {
    let mut occurrences: BTreeMap<MovementId, usize> = BTreeMap::new();
    for movement in movements {
        *occurrences.entry(movement.id).or_insert(0) += 1;
    }

    occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect()
}

/// Report every repeated id as a single [`ValidationError::Duplicate`].
///
/// Each id is listed once however often it repeats.
pub fn detect_duplicates(movements: &[Movement]) -> Option<ValidationError> {
    let duplicates = duplicate_ids(movements);
    if duplicates.is_empty() {
        return None;
    }

    let details = duplicates
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Some(ValidationError::Duplicate { details })
}
