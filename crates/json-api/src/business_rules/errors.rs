//! Business Rules Errors

use mealbox_app::domain::business_rules::BusinessRulesServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: BusinessRulesServiceError) -> ApiError {
    match error {
        BusinessRulesServiceError::Validation(source) => source.into(),
        BusinessRulesServiceError::Conflict => {
            ApiError::conflict("Business rules were changed by someone else, please retry")
        }
        BusinessRulesServiceError::NotFound => ApiError::not_found("Business rules not found"),
        BusinessRulesServiceError::InvalidData => {
            ApiError::bad_request("Invalid business rules payload")
        }
        BusinessRulesServiceError::Sql(source) => {
            ApiError::dependency("business rules storage failed", &source)
        }
    }
}
