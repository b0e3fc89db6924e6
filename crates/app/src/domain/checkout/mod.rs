//! Checkout
//!
//! Prices a basket from the catalogue, starts the payment, and turns a verified
//! payment into an order.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CheckoutServiceError;
pub use repository::*;
pub use service::*;
