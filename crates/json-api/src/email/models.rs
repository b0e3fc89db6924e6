//! Email Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use mealbox::{
    notifications::{ContactMessage, LineItem, OrderSummary, StatusUpdate},
    orders::{DeliveryStatus, UnknownStatus},
    validation::{ValidationError, require_text},
};

use crate::addresses::AddressBody;

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();

    require_text(field, &value)?;

    Ok(value)
}

fn status(field: &'static str, value: &str) -> Result<DeliveryStatus, ValidationError> {
    value
        .parse()
        .map_err(|source: UnknownStatus| ValidationError::Invalid {
            field,
            reason: source.to_string(),
        })
}

/// A recipe line in an order email.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct LineItemBody {
    pub name: Option<String>,
    pub quantity: Option<u32>,

    /// Unit price in kobo
    pub price: Option<u64>,
}

impl LineItemBody {
    fn into_line(self) -> Result<LineItem, ValidationError> {
        Ok(LineItem {
            name: required("items.name", self.name)?,
            quantity: self.quantity.ok_or(ValidationError::Missing {
                field: "items.quantity",
            })?,
            price: self.price.ok_or(ValidationError::Missing {
                field: "items.price",
            })?,
        })
    }
}

/// Body of `POST /email/order-notification`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct OrderNotificationRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub order_id: Option<String>,

    /// Amount paid in kobo
    pub amount: Option<u64>,
    pub items: Option<Vec<LineItemBody>>,
    pub address: Option<AddressBody>,
}

impl OrderNotificationRequest {
    /// Validate every field, naming the first one missing.
    pub(crate) fn into_summary(self) -> Result<OrderSummary, ValidationError> {
        let customer_name = required("customerName", self.customer_name)?;
        let customer_email = required("customerEmail", self.customer_email)?;
        let order_id = required("orderId", self.order_id)?;
        let amount = self
            .amount
            .ok_or(ValidationError::Missing { field: "amount" })?;

        let items = self
            .items
            .filter(|items| !items.is_empty())
            .ok_or(ValidationError::Missing { field: "items" })?
            .into_iter()
            .map(LineItemBody::into_line)
            .collect::<Result<Vec<_>, _>>()?;

        let address = self
            .address
            .ok_or(ValidationError::Missing { field: "address" })?
            .into_address()?;

        Ok(OrderSummary {
            order_id,
            customer_name,
            customer_email,
            amount,
            items,
            address,
        })
    }
}

/// Body of `POST /email/order-status-update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StatusUpdateEmailRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub order_id: Option<String>,
    pub current_status: Option<String>,
    pub previous_status: Option<String>,
    pub tracking_url: Option<String>,
}

impl StatusUpdateEmailRequest {
    /// The recipient and the update to send them.
    pub(crate) fn into_update(self) -> Result<(String, StatusUpdate), ValidationError> {
        let customer_name = required("customerName", self.customer_name)?;
        let customer_email = required("customerEmail", self.customer_email)?;
        let order_id = required("orderId", self.order_id)?;
        let current_status = status(
            "currentStatus",
            &required("currentStatus", self.current_status)?,
        )?;
        let previous_status = self
            .previous_status
            .filter(|value| !value.trim().is_empty())
            .map(|value| status("previousStatus", &value))
            .transpose()?;
        let tracking_url = required("trackingUrl", self.tracking_url)?;

        Ok((
            customer_email,
            StatusUpdate {
                order_id,
                customer_name,
                previous_status,
                current_status,
                tracking_url,
            },
        ))
    }
}

/// Body of `POST /email/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    pub(crate) fn into_message(self) -> Result<ContactMessage, ValidationError> {
        Ok(ContactMessage {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            subject: required("subject", self.subject)?,
            message: required("message", self.message)?,
        })
    }
}

/// Which recipients were reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailSentResponse {
    pub customer_notified: bool,
    pub admins_notified: bool,
}
