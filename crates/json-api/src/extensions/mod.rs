//! Depot helpers for handlers

mod depot;

pub(crate) use depot::DepotExt as _;
