//! Loosely typed body fields.
//!
//! Bodies that keep a field as a raw [`Value`] read it here, so a value of the
//! wrong JSON type is rejected with the field's name instead of a serde position.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use mealbox::validation::ValidationError;

/// Read an optional field with `read`. Absent and null both mean "not supplied".
pub(crate) fn read_field<T>(
    value: Option<Value>,
    field: &'static str,
    expected: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => read(&value).map(Some).ok_or_else(|| ValidationError::Invalid {
            field,
            reason: format!("expected {expected}, got {value}"),
        }),
    }
}

/// A JSON number as an exact decimal.
pub(crate) fn as_decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };

    let text = number.to_string();

    Decimal::from_str(&text)
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}

/// A JSON string, trimmed.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_and_null_are_not_supplied() {
        assert_eq!(read_field(None, "cost", "an integer", Value::as_i64), Ok(None));
        assert_eq!(
            read_field(Some(Value::Null), "cost", "an integer", Value::as_i64),
            Ok(None)
        );
    }

    #[test]
    fn wrong_type_names_the_field() {
        assert_eq!(
            read_field(Some(json!("100")), "cost", "an integer", Value::as_i64),
            Err(ValidationError::Invalid {
                field: "cost",
                reason: "expected an integer, got \"100\"".to_string(),
            })
        );
    }

    #[test]
    fn decimals_keep_their_digits() {
        assert_eq!(as_decimal(&json!(7.5)), Some(Decimal::new(75, 1)));
        assert_eq!(as_decimal(&json!(12)), Some(Decimal::from(12)));
        assert_eq!(as_decimal(&json!(true)), None);
    }
}
