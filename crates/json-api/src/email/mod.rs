//! Email trigger endpoints
//!
//! Explicit sends with fully specified payloads. Unlike order placement and
//! status changes, a failed send here is the primary outcome and fails the request.

mod handlers;
mod models;

pub(crate) use handlers::*;
