//! Checkout Models

use mealbox::{delivery::DeliveryAddress, rules::OrderTotal};
use uuid::Uuid;

use crate::domain::orders::models::OrderLine;

/// A recipe and quantity the customer wants to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutItem {
    pub recipe_id: Uuid,
    pub quantity: u32,
}

/// Basket and destination for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Signed-in customer, whose server cart is cleared after the order is placed.
    pub user_id: Option<Uuid>,
    pub items: Vec<CheckoutItem>,
    pub address: DeliveryAddress,
}

/// A checkout priced from current catalogue prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCheckout {
    pub lines: Vec<OrderLine>,
    pub total: OrderTotal,
}

/// A priced checkout waiting for its payment, keyed by payment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    pub reference: String,
    pub user_id: Option<Uuid>,
    pub lines: Vec<OrderLine>,
    pub address: DeliveryAddress,
    pub total: OrderTotal,
}

/// A payment started for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub reference: String,
    pub authorization_url: String,
    pub access_code: String,
    pub total: OrderTotal,
}
