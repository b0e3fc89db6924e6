//! Business Rules Models

use jiff::Timestamp;
use mealbox::rules::BusinessRules;

/// The persisted singleton with its concurrency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBusinessRules {
    pub rules: BusinessRules,
    pub version: i64,
    pub updated_at: Timestamp,
}
