//! Delivery Costs Errors

use mealbox_app::domain::delivery_costs::DeliveryCostsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: DeliveryCostsServiceError) -> ApiError {
    match error {
        DeliveryCostsServiceError::Validation(source) => source.into(),
        DeliveryCostsServiceError::NotFound => ApiError::not_found("Location not found"),
        DeliveryCostsServiceError::InvalidData => {
            ApiError::bad_request("Invalid delivery cost payload")
        }
        DeliveryCostsServiceError::Sql(source) => {
            ApiError::dependency("delivery cost storage failed", &source)
        }
    }
}
