//! Checkout service errors.

use mealbox::{orders::OrderError, validation::ValidationError};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{business_rules::BusinessRulesServiceError, orders::OrdersServiceError},
    payments::PaymentError,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidOrder(#[from] OrderError),

    #[error("recipe {0} not found")]
    RecipeNotFound(Uuid),

    #[error("quantity for recipe {0} must be at least 1")]
    InvalidQuantity(Uuid),

    #[error("no checkout was started with reference {0}")]
    UnknownReference(String),

    #[error("payment {reference} was not successful: {status}")]
    PaymentNotSuccessful { reference: String, status: String },

    #[error("payment amount {paid} does not match order total {expected}")]
    AmountMismatch { expected: u64, paid: u64 },

    #[error("payment gateway error")]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Pricing(#[from] BusinessRulesServiceError),

    #[error(transparent)]
    Order(#[from] OrdersServiceError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
