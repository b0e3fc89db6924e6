//! Order Models

use jiff::Timestamp;
use mealbox::{
    delivery::{DeliveryAddress, DeliveryRecord},
    notifications::LineItem,
    orders::{Order, StatusChange},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ordered recipe with its price snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub recipe_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub price: u64,
}

impl From<&OrderLine> for LineItem {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// The verified payment an order is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub status: String,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: Option<Uuid>,
    pub lines: Vec<OrderLine>,
    pub amount: u64,
    pub address: DeliveryAddress,
    pub payment: PaymentReceipt,
}

/// Transaction Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub uuid: Uuid,
    pub reference: String,
    pub user_id: Option<Uuid>,
    pub amount: u64,
    pub status: String,
    pub created_at: Timestamp,
}

/// Everything written atomically when an order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRecord {
    pub order: Order,
    pub delivery: DeliveryRecord,
    pub transaction: TransactionRecord,
}

/// An order together with its delivery record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: Order,
    pub delivery: DeliveryRecord,
}

/// Result of placing an order. Notification flags are informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: Order,
    pub delivery: DeliveryRecord,
    pub customer_notified: bool,
    pub admins_notified: bool,
}

/// Result of a delivery-status change. `customer_notified` is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub order: Order,
    pub change: StatusChange,
    pub customer_notified: bool,
}
