//! Carts
//!
//! Server-side carts, one per signed-in user, stored as a versioned document.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use repository::*;
pub use service::*;
