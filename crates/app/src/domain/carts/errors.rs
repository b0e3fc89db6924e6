//! Carts service errors.

use mealbox::carts::CartError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("recipe {0} not found")]
    RecipeNotFound(Uuid),

    #[error("cart was updated concurrently, please retry")]
    Conflict,

    #[error("cart not found")]
    NotFound,

    #[error("unknown user")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
