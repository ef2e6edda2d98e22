//! Error types for the append operation.

use thiserror::Error;

/// Reasons an observation is rejected at append time.
///
/// Every variant belongs to the invalid-observation class: the append that
/// produced it left the store untouched, and the clinician is expected to
/// correct the input and submit again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    /// A required numeric field had no value.
    #[error("invalid observation: {field} is missing")]
    MissingField { field: &'static str },

    /// A numeric field was not finite or fell outside its declared range.
    #[error("invalid observation: {field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ObservationError {
    /// Label of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ObservationError::MissingField { field } => field,
            ObservationError::OutOfRange { field, .. } => field,
        }
    }
}
