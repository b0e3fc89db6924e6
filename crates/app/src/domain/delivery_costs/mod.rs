//! Delivery Costs
//!
//! Persistence for the location cost table. Every write targets a single
//! `(state, lga)` row, so concurrent edits to different LGAs never overwrite
//! each other.

pub mod errors;
mod repository;
pub mod service;

pub use errors::DeliveryCostsServiceError;
pub use repository::*;
pub use service::*;
