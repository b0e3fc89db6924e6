//! Delivery records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    orders::DeliveryStatus,
    validation::{ValidationError, require_text},
};

/// The `(state, LGA)` pair delivery pricing is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    /// State name.
    pub state: String,

    /// Local Government Area.
    pub lga: String,
}

impl Destination {
    /// Create a destination. Keys are taken verbatim.
    pub fn new(state: impl Into<String>, lga: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            lga: lga.into(),
        }
    }
}

/// Where an order goes and who receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Recipient name.
    pub name: String,

    /// Recipient email, used for order notifications.
    pub email: String,

    /// Recipient phone number.
    pub phone: String,

    /// Street address.
    pub street: String,

    /// City or town.
    pub city: String,

    /// State name.
    pub state: String,

    /// Local Government Area.
    pub lga: String,
}

impl DeliveryAddress {
    /// Check every field is present, reporting the first one that is not.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Missing`] for a blank field, or
    /// [`ValidationError::Invalid`] for an email without an `@`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("phone", &self.phone)?;
        require_text("street", &self.street)?;
        require_text("city", &self.city)?;
        require_text("state", &self.state)?;
        require_text("lga", &self.lga)?;

        if !self.email.contains('@') {
            return Err(ValidationError::Invalid {
                field: "email",
                reason: "expected an email address".to_string(),
            });
        }

        Ok(())
    }

    /// The pricing key for this address.
    pub fn destination(&self) -> Destination {
        Destination::new(self.state.clone(), self.lga.clone())
    }
}

/// When each delivery milestone was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMilestones {
    /// Order placed.
    pub pending_at: Option<Timestamp>,

    /// Packed for dispatch.
    pub packed_at: Option<Timestamp>,

    /// Handed to the rider.
    pub in_transit_at: Option<Timestamp>,

    /// Delivered to the customer.
    pub delivered_at: Option<Timestamp>,

    /// Delivery abandoned.
    pub failed_at: Option<Timestamp>,
}

impl DeliveryMilestones {
    fn slot(&mut self, status: DeliveryStatus) -> &mut Option<Timestamp> {
        match status {
            DeliveryStatus::Pending => &mut self.pending_at,
            DeliveryStatus::Packed => &mut self.packed_at,
            DeliveryStatus::InTransit => &mut self.in_transit_at,
            DeliveryStatus::Delivered => &mut self.delivered_at,
            DeliveryStatus::Failed => &mut self.failed_at,
        }
    }

    /// Record that `status` was reached at `at`.
    pub fn stamp(&mut self, status: DeliveryStatus, at: Timestamp) {
        *self.slot(status) = Some(at);
    }

    /// When `status` was reached, if it has been.
    pub fn get(&self, status: DeliveryStatus) -> Option<Timestamp> {
        match status {
            DeliveryStatus::Pending => self.pending_at,
            DeliveryStatus::Packed => self.packed_at,
            DeliveryStatus::InTransit => self.in_transit_at,
            DeliveryStatus::Delivered => self.delivered_at,
            DeliveryStatus::Failed => self.failed_at,
        }
    }
}

/// The shipping record linked one-to-one with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Record id.
    pub id: Uuid,

    /// Destination and contact details.
    pub address: DeliveryAddress,

    /// Milestone timestamps.
    pub milestones: DeliveryMilestones,
}

impl DeliveryRecord {
    /// A record for a freshly placed order, with the pending milestone stamped.
    pub fn new(id: Uuid, address: DeliveryAddress, placed_at: Timestamp) -> Self {
        let mut milestones = DeliveryMilestones::default();
        milestones.stamp(DeliveryStatus::Pending, placed_at);

        Self {
            id,
            address,
            milestones,
        }
    }
}
