//! Notifications
//!
//! One variant per email the store sends, each carrying exactly the fields its
//! template needs. Rendering is pure; delivery lives with the email providers.

use std::fmt;

use thiserror::Error;

use crate::{delivery::DeliveryAddress, money::AmountOverflow, orders::DeliveryStatus};

mod presentation;
mod templates;

pub use presentation::StatusPresentation;

/// Errors rendering a notification.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Order emails must list at least one item.
    #[error("order has no line items")]
    NoLineItems,

    /// An amount could not be formatted.
    #[error(transparent)]
    Amount(#[from] AmountOverflow),

    /// Writing the template failed.
    #[error("template formatting failed")]
    Format(#[from] fmt::Error),
}

/// Which template a notification uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Customer receipt for a new order.
    OrderConfirmation,

    /// Admin alert for a new order.
    AdminOrderAlert,

    /// Customer update for a delivery-status change.
    StatusUpdate,

    /// Contact form message forwarded to admins.
    ContactForm,
}

impl NotificationKind {
    /// Stable name for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrderConfirmation => "order_confirmation",
            Self::AdminOrderAlert => "admin_order_alert",
            Self::StatusUpdate => "status_update",
            Self::ContactForm => "contact_form",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered recipe as shown in emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Recipe name.
    pub name: String,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price in minor units.
    pub price: u64,
}

/// Fields shared by the two new-order emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Order id as shown to people.
    pub order_id: String,

    /// Customer display name.
    pub customer_name: String,

    /// Customer email.
    pub customer_email: String,

    /// Amount charged, in minor units.
    pub amount: u64,

    /// Ordered recipes.
    pub items: Vec<LineItem>,

    /// Delivery destination.
    pub address: DeliveryAddress,
}

/// A delivery-status change, as told to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Order id as shown to people.
    pub order_id: String,

    /// Customer display name.
    pub customer_name: String,

    /// Status before the change, when known.
    pub previous_status: Option<DeliveryStatus>,

    /// Status after the change.
    pub current_status: DeliveryStatus,

    /// Link to the order tracking page.
    pub tracking_url: String,
}

/// A message from the public contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,

    /// Sender email, for replies.
    pub email: String,

    /// Subject line chosen by the sender.
    pub subject: String,

    /// Message body.
    pub message: String,
}

/// An email the store can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Receipt sent to the customer.
    OrderConfirmation(OrderSummary),

    /// Alert sent to every admin.
    AdminOrderAlert(OrderSummary),

    /// Delivery-status change sent to the customer.
    StatusUpdate(StatusUpdate),

    /// Contact form forwarded to admins.
    ContactForm(ContactMessage),
}

impl Notification {
    /// The template this notification uses.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::OrderConfirmation(_) => NotificationKind::OrderConfirmation,
            Self::AdminOrderAlert(_) => NotificationKind::AdminOrderAlert,
            Self::StatusUpdate(_) => NotificationKind::StatusUpdate,
            Self::ContactForm(_) => NotificationKind::ContactForm,
        }
    }

    /// Subject line.
    pub fn subject(&self) -> String {
        match self {
            Self::OrderConfirmation(summary) => {
                format!("Order Confirmation - #{}", order_suffix(&summary.order_id))
            }
            Self::AdminOrderAlert(summary) => {
                format!("New Order Received - #{}", order_suffix(&summary.order_id))
            }
            Self::StatusUpdate(update) => format!(
                "Order #{} is now {}",
                order_suffix(&update.order_id),
                update.current_status.display_name()
            ),
            Self::ContactForm(contact) => format!("Contact Form: {}", contact.subject),
        }
    }

    /// Render the HTML body.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when a required field is empty, an order has no
    /// items, or an amount cannot be formatted. Nothing is ever silently omitted.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Self::OrderConfirmation(summary) => templates::order_confirmation(summary),
            Self::AdminOrderAlert(summary) => templates::admin_order_alert(summary),
            Self::StatusUpdate(update) => templates::status_update(update),
            Self::ContactForm(contact) => templates::contact_form(contact),
        }
    }

    /// Render into a message addressed to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if rendering fails.
    pub fn to_message(&self, to: Vec<String>) -> Result<EmailMessage, RenderError> {
        Ok(EmailMessage {
            to,
            subject: self.subject(),
            html: self.render()?,
        })
    }
}

/// The last eight characters of an order id, upper-cased.
pub fn order_suffix(order_id: &str) -> String {
    let count = order_id.chars().count();

    order_id
        .chars()
        .skip(count.saturating_sub(8))
        .collect::<String>()
        .to_uppercase()
}

/// A rendered email ready for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient addresses.
    pub to: Vec<String>,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    pub html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            name: "Ada Obi".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+2348000000000".to_string(),
            street: "12 Allen Avenue".to_string(),
            city: "Ikeja".to_string(),
            state: "Lagos".to_string(),
            lga: "Ikeja".to_string(),
        }
    }

    fn summary() -> OrderSummary {
        OrderSummary {
            order_id: "0191c2d4-7e1a-7c3b-9a55-3f2e8d1b6a9c".to_string(),
            customer_name: "Ada Obi".to_string(),
            customer_email: "ada@example.com".to_string(),
            amount: 567_500,
            items: vec![LineItem {
                name: "Jollof Rice Kit".to_string(),
                quantity: 2,
                price: 250_000,
            }],
            address: address(),
        }
    }

    #[test]
    fn order_suffix_takes_last_eight_upper_cased() {
        assert_eq!(
            order_suffix("0191c2d4-7e1a-7c3b-9a55-3f2e8d1b6a9c"),
            "8D1B6A9C"
        );
        assert_eq!(order_suffix("abc"), "ABC");
    }

    #[test]
    fn subjects_per_kind() {
        let status = Notification::StatusUpdate(StatusUpdate {
            order_id: "order-00abcdef".to_string(),
            customer_name: "Ada".to_string(),
            previous_status: Some(DeliveryStatus::Packed),
            current_status: DeliveryStatus::InTransit,
            tracking_url: "https://example.com/orders/1".to_string(),
        });
        let contact = Notification::ContactForm(ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Allergies".to_string(),
            message: "Do you have nut-free kits?".to_string(),
        });

        assert_eq!(
            Notification::OrderConfirmation(summary()).subject(),
            "Order Confirmation - #8D1B6A9C"
        );
        assert_eq!(
            Notification::AdminOrderAlert(summary()).subject(),
            "New Order Received - #8D1B6A9C"
        );
        assert_eq!(status.subject(), "Order #00ABCDEF is now In Transit");
        assert_eq!(contact.subject(), "Contact Form: Allergies");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            Notification::AdminOrderAlert(summary()).kind(),
            NotificationKind::AdminOrderAlert
        );
        assert_eq!(NotificationKind::StatusUpdate.as_str(), "status_update");
    }

    #[test]
    fn to_message_carries_subject_and_body() -> testresult::TestResult {
        let notification = Notification::OrderConfirmation(summary());

        let message = notification.to_message(vec!["ada@example.com".to_string()])?;

        assert_eq!(message.to, ["ada@example.com"]);
        assert_eq!(message.subject, notification.subject());
        assert!(message.html.contains("Jollof Rice Kit"));

        Ok(())
    }
}
