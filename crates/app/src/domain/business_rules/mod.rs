//! Business Rules

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::BusinessRulesServiceError;
pub use repository::*;
pub use service::*;
