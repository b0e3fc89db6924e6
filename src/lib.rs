//! Mealbox
//!
//! The domain core of a meal-kit storefront: delivery pricing, business rules,
//! the order lifecycle, carts and notification rendering. This crate does no I/O.

pub mod carts;
pub mod delivery;
pub mod locations;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod rules;
pub mod validation;
