//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mealbox::{
    delivery::{DeliveryMilestones, DeliveryRecord},
    orders::Order,
};

use crate::addresses::AddressBody;

/// When each delivery milestone was reached, as RFC 3339 strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MilestonesResponse {
    pub pending_at: Option<String>,
    pub packed_at: Option<String>,
    pub in_transit_at: Option<String>,
    pub delivered_at: Option<String>,
    pub failed_at: Option<String>,
}

impl From<&DeliveryMilestones> for MilestonesResponse {
    fn from(milestones: &DeliveryMilestones) -> Self {
        Self {
            pending_at: milestones.pending_at.map(|at| at.to_string()),
            packed_at: milestones.packed_at.map(|at| at.to_string()),
            in_transit_at: milestones.in_transit_at.map(|at| at.to_string()),
            delivered_at: milestones.delivered_at.map(|at| at.to_string()),
            failed_at: milestones.failed_at.map(|at| at.to_string()),
        }
    }
}

/// Shipping record of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryResponse {
    /// Delivery record id
    pub id: Uuid,

    /// Destination
    pub address: AddressBody,

    /// Milestone timestamps
    pub milestones: MilestonesResponse,
}

impl From<DeliveryRecord> for DeliveryResponse {
    fn from(delivery: DeliveryRecord) -> Self {
        Self {
            id: delivery.id,
            milestones: MilestonesResponse::from(&delivery.milestones),
            address: delivery.address.into(),
        }
    }
}

/// An order with its delivery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Order id
    pub id: Uuid,

    /// Customer account, absent for guest orders
    pub user_id: Option<Uuid>,

    /// Ordered recipes
    pub recipe_ids: Vec<Uuid>,

    /// Amount paid in kobo
    pub amount: u64,

    /// Fulfilment stage
    pub delivery_status: String,

    /// Customer acknowledgement of receipt
    pub received_status: String,

    /// When the order was delivered
    pub delivery_date: Option<String>,

    /// Payment transaction id
    pub transaction_id: Uuid,

    /// When the order was placed
    pub created_at: String,

    /// When the order last changed
    pub updated_at: String,

    /// Shipping record
    pub delivery: DeliveryResponse,
}

impl OrderResponse {
    pub(crate) fn new(order: Order, delivery: DeliveryRecord) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            recipe_ids: order.recipe_ids,
            amount: order.amount,
            delivery_status: order.delivery_status.as_str().to_string(),
            received_status: order.received_status.as_str().to_string(),
            delivery_date: order.delivery_date.map(|at| at.to_string()),
            transaction_id: order.transaction_id,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            delivery: delivery.into(),
        }
    }
}

/// Body of `PUT /orders/update-status`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateStatusRequest {
    /// Order to move
    pub order_id: Option<String>,

    /// Requested status: pending, packed, in_transit, delivered or failed
    pub delivery_status: Option<String>,

    /// Acting admin
    pub user_id: Option<String>,
}

/// Outcome of a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusChangeResponse {
    pub order_id: Uuid,
    pub previous_status: String,
    pub current_status: String,

    /// Whether the customer email went out. Informational only.
    pub customer_notified: bool,
}
