//! Cart Models

use mealbox::carts::Cart;
use uuid::Uuid;

/// A persisted cart with its concurrency version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCart {
    pub cart: Cart,
    pub version: i64,
}

/// Request to add a recipe to a cart. Name and price are snapshotted from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCartItem {
    pub recipe_id: Uuid,
    pub quantity: u32,
    pub packaging: Option<String>,
}
