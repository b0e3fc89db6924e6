//! Business Rules Handlers

pub(crate) mod get;
pub(crate) mod update;
