//! Order Errors

use mealbox_app::domain::orders::OrdersServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::Validation(source) => source.into(),
        OrdersServiceError::InvalidOrder(source) => ApiError::bad_request(source.to_string()),
        OrdersServiceError::Transition(source) => ApiError::bad_request(source.to_string()),
        OrdersServiceError::Unauthenticated => {
            ApiError::unauthorized("userId is required to update delivery status")
        }
        OrdersServiceError::Forbidden => {
            ApiError::forbidden("Only admins can update delivery status")
        }
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::ConcurrentUpdate => {
            ApiError::conflict("Order was updated by someone else, please retry")
        }
        OrdersServiceError::AlreadyExists => {
            ApiError::conflict("This payment has already been used for an order")
        }
        OrdersServiceError::InvalidReference => {
            ApiError::bad_request("Order refers to an unknown user or recipe")
        }
        OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload"),
        OrdersServiceError::Sql(source) => ApiError::dependency("order storage failed", &source),
    }
}
