//! Orders service errors.

use mealbox::{
    orders::{OrderError, TransitionError},
    validation::ValidationError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::users::UsersServiceError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidOrder(#[from] OrderError),

    #[error("authentication required")]
    Unauthenticated,

    #[error("only admins can update delivery status")]
    Forbidden,

    #[error("order not found")]
    NotFound,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("order was updated concurrently, please retry")]
    ConcurrentUpdate,

    #[error("payment has already been used for an order")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<UsersServiceError> for OrdersServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::Unauthenticated => Self::Unauthenticated,
            UsersServiceError::Forbidden => Self::Forbidden,
            UsersServiceError::Sql(source) => Self::Sql(source),
        }
    }
}
