//! Checkout Handlers

pub(crate) mod complete;
pub(crate) mod initialize;
pub(crate) mod quote;
