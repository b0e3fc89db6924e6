//! Business Rules

pub(crate) mod errors;
mod handlers;
mod models;

pub(crate) use handlers::*;
