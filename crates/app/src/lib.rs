//! Persistence, services and outbound integrations for the Mealbox storefront.

pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;
pub mod payments;

#[cfg(test)]
mod test;
