//! Input validation

use thiserror::Error;

/// Malformed or out-of-range input. Every variant names the offending field
/// using its wire (camelCase) name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    Missing {
        /// Field name.
        field: &'static str,
    },

    /// A field that must be zero or more was negative.
    #[error("{field} must not be negative")]
    Negative {
        /// Field name.
        field: &'static str,
    },

    /// A field fell outside its inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// A field was present but could not be interpreted.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// The field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Negative { field }
            | Self::OutOfRange { field, .. }
            | Self::Invalid { field, .. } => field,
        }
    }
}

/// Reject blank text.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] when `value` is empty or whitespace.
pub fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }

    Ok(value)
}

/// Convert a signed amount to minor units, rejecting negatives.
///
/// # Errors
///
/// Returns [`ValidationError::Negative`] when `value` is below zero.
pub fn non_negative(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_negative| ValidationError::Negative { field })
}
