//! Order Handlers

pub(crate) mod get;
pub(crate) mod update_status;

