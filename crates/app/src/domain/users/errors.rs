//! Users service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("admin privileges required")]
    Forbidden,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
