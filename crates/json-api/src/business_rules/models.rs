//! Business Rules Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mealbox::{
    rules::{BusinessRules, BusinessRulesUpdate},
    validation::ValidationError,
};

use crate::fields::{as_decimal, read_field};

/// Current store-wide pricing policy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BusinessRulesResponse {
    /// Flat delivery fee in kobo
    pub delivery_fee: u64,

    /// Tax rate in percent
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub tax_rate: Decimal,

    /// Whether tax is charged
    pub tax_enabled: bool,
}

impl From<BusinessRules> for BusinessRulesResponse {
    fn from(rules: BusinessRules) -> Self {
        Self {
            delivery_fee: rules.delivery_fee,
            tax_rate: rules.tax_rate,
            tax_enabled: rules.tax_enabled,
        }
    }
}

/// Partial update. Omitted or null fields keep their current value.
///
/// Fields are read loosely so a wrongly typed value is reported by name.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBusinessRulesRequest {
    /// Admin making the change
    #[serde(default)]
    pub user_id: Option<String>,

    /// Flat delivery fee in kobo, zero or more
    #[serde(default)]
    #[salvo(schema(value_type = Option<i64>))]
    pub delivery_fee: Option<Value>,

    /// Tax rate in percent, between 0 and 100
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub tax_rate: Option<Value>,

    /// Whether tax is charged
    #[serde(default)]
    #[salvo(schema(value_type = Option<bool>))]
    pub tax_enabled: Option<Value>,
}

impl TryFrom<UpdateBusinessRulesRequest> for BusinessRulesUpdate {
    type Error = ValidationError;

    fn try_from(request: UpdateBusinessRulesRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            delivery_fee: read_field(
                request.delivery_fee,
                "deliveryFee",
                "an integer",
                Value::as_i64,
            )?,
            tax_rate: read_field(request.tax_rate, "taxRate", "a number", as_decimal)?,
            tax_enabled: read_field(
                request.tax_enabled,
                "taxEnabled",
                "a boolean",
                Value::as_bool,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn parse(body: Value) -> Result<BusinessRulesUpdate, ValidationError> {
        let request: UpdateBusinessRulesRequest =
            serde_json::from_value(body).map_err(|error| ValidationError::Invalid {
                field: "body",
                reason: error.to_string(),
            })?;

        BusinessRulesUpdate::try_from(request)
    }

    #[test]
    fn reads_typed_fields() -> TestResult {
        let update = parse(json!({ "deliveryFee": 700, "taxRate": 7.5, "taxEnabled": false }))?;

        assert_eq!(update.delivery_fee, Some(700));
        assert_eq!(update.tax_rate, Some(Decimal::new(75, 1)));
        assert_eq!(update.tax_enabled, Some(false));

        Ok(())
    }

    #[test]
    fn null_fields_are_left_alone() -> TestResult {
        let update = parse(json!({ "deliveryFee": null, "taxEnabled": true }))?;

        assert_eq!(update.delivery_fee, None);
        assert_eq!(update.tax_rate, None);
        assert_eq!(update.tax_enabled, Some(true));

        Ok(())
    }

    #[test]
    fn wrongly_typed_fields_are_named() {
        let cases = [
            (json!({ "deliveryFee": "500" }), "deliveryFee"),
            (json!({ "deliveryFee": 5.5 }), "deliveryFee"),
            (json!({ "taxRate": "7.5" }), "taxRate"),
            (json!({ "taxEnabled": "yes" }), "taxEnabled"),
        ];

        for (body, expected) in cases {
            match parse(body) {
                Err(ValidationError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }
}
