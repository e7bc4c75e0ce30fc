//! # Validation Errors
//!
//! Field-level validation failures shared by every crate that accepts user
//! input. Each variant names the offending field so callers can report it
//! without string parsing.

use thiserror::Error;

/// A value failed a field-level validation rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the field.
        field: &'static str,
    },

    /// A text field exceeded its maximum length (in characters).
    #[error("{field} is too long: {actual} characters, maximum is {max}")]
    TooLong {
        /// Name of the field.
        field: &'static str,
        /// Maximum permitted length.
        max: usize,
        /// Observed length.
        actual: usize,
    },

    /// A numeric field was outside its permitted range.
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
        /// Observed value.
        actual: i64,
    },

    /// An account role tag did not match any known role.
    #[error("unknown account role: {0:?}")]
    UnknownRole(String),

    /// A timestamp string could not be accepted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl ValidationError {
    /// Check that `value` is non-blank and at most `max` characters long.
    pub fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), Self> {
        if value.trim().is_empty() {
            return Err(Self::EmptyField { field });
        }
        let actual = value.chars().count();
        if actual > max {
            return Err(Self::TooLong { field, max, actual });
        }
        Ok(())
    }
}
