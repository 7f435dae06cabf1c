//! Input validation utilities.
//!
//! Each helper wraps a `care-types` constructor and attaches the name of the
//! offending field so that callers receive field-level detail.

use crate::{CoreError, CoreResult};
use care_types::{Age, NonEmptyText, PositiveMeasure};

pub fn require_text(field: &str, value: &str) -> CoreResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|e| CoreError::validation(field, e.to_string()))
}

pub fn require_measure(field: &str, value: f64) -> CoreResult<PositiveMeasure> {
    PositiveMeasure::new(value).map_err(|e| CoreError::validation(field, e.to_string()))
}

pub fn require_age(value: i64) -> CoreResult<Age> {
    Age::new(value).map_err(|e| CoreError::validation("age", e.to_string()))
}

/// Parse a string against a closed set of allowed values.
///
/// The error message lists the permitted values in the order given.
pub fn require_one_of<T: Copy>(field: &str, value: &str, allowed: &[(&str, T)]) -> CoreResult<T> {
    allowed
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, v)| *v)
        .ok_or_else(|| {
            let names: Vec<&str> = allowed.iter().map(|(name, _)| *name).collect();
            CoreError::validation(field, format!("must be one of {}", names.join(", ")))
        })
}
