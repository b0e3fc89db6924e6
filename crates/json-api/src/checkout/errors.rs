//! Checkout Errors

use salvo::http::StatusCode;

use mealbox_app::domain::checkout::CheckoutServiceError;

use crate::{business_rules, orders, responses::ApiError};

pub(crate) fn into_api_error(error: CheckoutServiceError) -> ApiError {
    match error {
        CheckoutServiceError::Validation(source) => source.into(),
        CheckoutServiceError::InvalidOrder(source) => ApiError::bad_request(source.to_string()),
        CheckoutServiceError::InvalidQuantity(_) => ApiError::bad_request(error.to_string()),
        CheckoutServiceError::RecipeNotFound(_) | CheckoutServiceError::UnknownReference(_) => {
            ApiError::not_found(error.to_string())
        }
        CheckoutServiceError::PaymentNotSuccessful { .. }
        | CheckoutServiceError::AmountMismatch { .. } => {
            ApiError::new(StatusCode::PAYMENT_REQUIRED, error.to_string())
        }
        CheckoutServiceError::Payment(source) => {
            ApiError::dependency("payment gateway call failed", &source)
        }
        CheckoutServiceError::Pricing(source) => business_rules::errors::into_api_error(source),
        CheckoutServiceError::Order(source) => orders::errors::into_api_error(source),
        CheckoutServiceError::Sql(source) => {
            ApiError::dependency("checkout storage failed", &source)
        }
    }
}
