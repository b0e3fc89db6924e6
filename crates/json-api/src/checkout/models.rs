//! Checkout Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mealbox::{
    delivery::Destination,
    rules::{FeeSource, OrderTotal},
    validation::ValidationError,
};
use mealbox_app::domain::{
    checkout::models::{CheckoutItem, CheckoutRequest, CheckoutSession},
    orders::models::PlacedOrder,
};

use crate::{addresses::AddressBody, orders::OrderResponse};

/// Body of `POST /checkout/quote`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    /// Basket subtotal in kobo
    pub subtotal: u64,

    /// Delivery state
    #[serde(default)]
    pub state: Option<String>,

    /// Delivery LGA
    #[serde(default)]
    pub lga: Option<String>,
}

impl QuoteRequest {
    /// The destination to price, if one was given. `state` and `lga` come as a pair.
    pub(crate) fn destination(&self) -> Result<Option<Destination>, ValidationError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        match (present(&self.state), present(&self.lga)) {
            (Some(state), Some(lga)) => Ok(Some(Destination::new(state, lga))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ValidationError::Missing { field: "lga" }),
            (None, Some(_)) => Err(ValidationError::Missing { field: "state" }),
        }
    }
}

/// Breakdown of a checkout total, in kobo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderTotalResponse {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax: u64,
    pub total: u64,

    /// `location` when a location override priced delivery, otherwise `flat`
    pub fee_source: String,
}

impl From<OrderTotal> for OrderTotalResponse {
    fn from(total: OrderTotal) -> Self {
        Self {
            subtotal: total.subtotal,
            delivery_fee: total.delivery_fee,
            tax: total.tax,
            total: total.total,
            fee_source: match total.fee_source {
                FeeSource::Flat => "flat",
                FeeSource::Location => "location",
            }
            .to_string(),
        }
    }
}

/// A recipe and quantity to buy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemBody {
    pub recipe_id: Uuid,
    pub quantity: u32,
}

/// Basket and destination shared by initialise and complete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CheckoutBody {
    /// Signed-in customer, if any
    pub user_id: Option<Uuid>,

    /// Recipes to buy
    pub items: Vec<CheckoutItemBody>,

    /// Delivery destination
    pub address: AddressBody,
}

impl From<CheckoutBody> for CheckoutRequest {
    fn from(body: CheckoutBody) -> Self {
        Self {
            user_id: body.user_id,
            items: body
                .items
                .into_iter()
                .map(|item| CheckoutItem {
                    recipe_id: item.recipe_id,
                    quantity: item.quantity,
                })
                .collect(),
            address: body.address.into(),
        }
    }
}

/// Body of `POST /checkout/complete`.
///
/// The basket, address and price are the ones recorded when the payment started.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CompleteCheckoutRequest {
    /// Payment reference returned by initialise
    pub reference: String,
}

/// A started payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutSessionResponse {
    pub reference: String,

    /// Where to send the customer to pay
    pub authorization_url: String,
    pub access_code: String,
    pub total: OrderTotalResponse,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            reference: session.reference,
            authorization_url: session.authorization_url,
            access_code: session.access_code,
            total: session.total.into(),
        }
    }
}

/// A placed order. Notification flags are informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlacedOrderResponse {
    pub order: OrderResponse,
    pub customer_notified: bool,
    pub admins_notified: bool,
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order: OrderResponse::new(placed.order, placed.delivery),
            customer_notified: placed.customer_notified,
            admins_notified: placed.admins_notified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_needs_both_parts() {
        let quote = |state: Option<&str>, lga: Option<&str>| QuoteRequest {
            subtotal: 1_000,
            state: state.map(str::to_string),
            lga: lga.map(str::to_string),
        };

        assert_eq!(
            quote(Some("Lagos"), Some("Ikeja")).destination(),
            Ok(Some(Destination::new("Lagos", "Ikeja")))
        );
        assert_eq!(quote(None, None).destination(), Ok(None));
        assert_eq!(
            quote(Some("Lagos"), Some(" ")).destination(),
            Err(ValidationError::Missing { field: "lga" })
        );
        assert_eq!(
            quote(None, Some("Ikeja")).destination(),
            Err(ValidationError::Missing { field: "state" })
        );
    }
}
