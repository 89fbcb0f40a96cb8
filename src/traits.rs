//! Traits for plugging custom validation rules into the engine

use crate::types::*;

/// Rule deciding whether one period reconciles
///
/// The engine calls this once per [`MovementGroup`], in date order, and
/// collects every error returned. Implementations must not panic on
/// business-rule violations; they report them as [`ValidationError`] values.
pub trait GroupValidator: Send + Sync {
    /// Validate a single period, returning `None` when it reconciles
    fn validate_group(&self, group: &MovementGroup<'_>) -> Option<ValidationError>;
}

