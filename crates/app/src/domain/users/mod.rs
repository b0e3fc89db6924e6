//! Users

pub mod errors;
pub mod models;
mod repository;
mod service;

pub use errors::UsersServiceError;
pub use repository::*;
pub use service::{DefaultUsersService, MockUsersService, UsersService};
pub(crate) use service::require_admin;
