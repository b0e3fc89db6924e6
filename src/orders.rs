//! Orders
//!
//! The order aggregate and its delivery-status state machine:
//!
//! ```text
//! pending -> packed -> in_transit -> delivered
//!    \________\____________\______-> failed
//! ```
//!
//! Statuses only move forward one step at a time. `failed` is reachable from any
//! non-terminal status. `delivered` and `failed` are terminal.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fulfilment stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Placed, not yet packed.
    Pending,

    /// Packed and awaiting dispatch.
    Packed,

    /// Out for delivery.
    #[serde(alias = "in-transit")]
    InTransit,

    /// Delivered to the customer.
    Delivered,

    /// Delivery abandoned.
    Failed,
}

impl DeliveryStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Packed,
        Self::InTransit,
        Self::Delivered,
        Self::Failed,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Packed => "packed",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    /// Human-readable name, used in subjects and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Packed => "Packed",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Failed => "Failed",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }

    /// The next step on the happy path.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Packed),
            Self::Packed => Some(Self::InTransit),
            Self::InTransit => Some(Self::Delivered),
            Self::Delivered | Self::Failed => None,
        }
    }

    /// Check that moving from `self` to `to` is allowed.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::AlreadyInStatus`] when `to == self`.
    /// - [`TransitionError::InvalidTransition`] when `self` is terminal, or `to` is
    ///   neither `failed` nor the immediate successor.
    pub fn check_transition(self, to: Self) -> Result<(), TransitionError> {
        if self == to {
            return Err(TransitionError::AlreadyInStatus(to));
        }

        let allowed = !self.is_terminal() && (to == Self::Failed || self.next() == Some(to));

        if allowed {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A status name that matches no known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    /// Case-insensitive; accepts `in_transit`, `in-transit` and `in transit`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalised)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Customer acknowledgement of receipt. Independent of [`DeliveryStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivedStatus {
    /// Not yet acknowledged.
    #[default]
    Pending,

    /// Customer confirmed receipt.
    Received,

    /// Customer reported non-receipt.
    Failed,
}

impl ReceivedStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for ReceivedStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "received" => Ok(Self::Received),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownStatus(value.to_string())),
        }
    }
}

/// A rejected delivery-status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The order is already in the requested status.
    #[error("order is already {0}")]
    AlreadyInStatus(DeliveryStatus),

    /// The requested status is not reachable from the current one.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: DeliveryStatus,
        /// Requested status.
        to: DeliveryStatus,
    },
}

/// Errors building an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// An order needs at least one recipe.
    #[error("order must contain at least one recipe")]
    NoRecipes,
}

/// Everything needed to place an order. Ids are allocated by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Order id.
    pub id: Uuid,

    /// Account that placed the order; `None` for guest checkout.
    pub user_id: Option<Uuid>,

    /// Ordered recipes, one entry per unit.
    pub recipe_ids: Vec<Uuid>,

    /// Total charged, in minor units.
    pub amount: u64,

    /// Linked delivery record.
    pub delivery_id: Uuid,

    /// Originating payment transaction.
    pub transaction_id: Uuid,
}

/// A confirmed purchase.
///
/// Only the status fields and `updated_at` change after placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order id.
    pub id: Uuid,

    /// Account that placed the order, if any.
    pub user_id: Option<Uuid>,

    /// Ordered recipes, one entry per unit, never empty.
    pub recipe_ids: Vec<Uuid>,

    /// Total charged, in minor units.
    pub amount: u64,

    /// Linked delivery record.
    pub delivery_id: Uuid,

    /// Originating payment transaction.
    pub transaction_id: Uuid,

    /// Fulfilment stage.
    pub delivery_status: DeliveryStatus,

    /// Customer acknowledgement.
    pub received_status: ReceivedStatus,

    /// Set when the order reaches [`DeliveryStatus::Delivered`].
    pub delivery_date: Option<Timestamp>,

    /// Placement time.
    pub created_at: Timestamp,

    /// Last mutation time.
    pub updated_at: Timestamp,
}

/// The outcome of a successful status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the change.
    pub previous: DeliveryStatus,

    /// Status after the change.
    pub current: DeliveryStatus,

    /// When the change happened.
    pub changed_at: Timestamp,
}

impl Order {
    /// Place a new order in `pending`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoRecipes`] when the draft has no recipes.
    pub fn place(draft: OrderDraft, at: Timestamp) -> Result<Self, OrderError> {
        if draft.recipe_ids.is_empty() {
            return Err(OrderError::NoRecipes);
        }

        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            recipe_ids: draft.recipe_ids,
            amount: draft.amount,
            delivery_id: draft.delivery_id,
            transaction_id: draft.transaction_id,
            delivery_status: DeliveryStatus::Pending,
            received_status: ReceivedStatus::Pending,
            delivery_date: None,
            created_at: at,
            updated_at: at,
        })
    }

    /// Move to `to` at time `at`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] if the move is not allowed; the order is unchanged.
    pub fn apply_status(
        &mut self,
        to: DeliveryStatus,
        at: Timestamp,
    ) -> Result<StatusChange, TransitionError> {
        let previous = self.delivery_status;
        previous.check_transition(to)?;

        self.delivery_status = to;
        self.updated_at = at;

        if to == DeliveryStatus::Delivered {
            self.delivery_date = Some(at);
        }

        Ok(StatusChange {
            previous,
            current: to,
            changed_at: at,
        })
    }
}
