//! Order Notification Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::{info, warn};

use mealbox::notifications::Notification;

use crate::{
    email::{
        handlers::send_failed,
        models::{EmailSentResponse, OrderNotificationRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Order Notification Handler
///
/// Sends the order confirmation to the customer and the new-order alert to
/// every admin. Fails only when the customer email could not be sent.
#[endpoint(
    tags("email"),
    summary = "Send Order Emails",
    responses(
        (status_code = StatusCode::OK, description = "Customer emailed"),
        (status_code = StatusCode::BAD_REQUEST, description = "A required field is missing"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Every email provider failed"),
    ),
)]
#[tracing::instrument(
    name = "email.order_notification",
    skip(json, depot),
    fields(order_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<OrderNotificationRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<EmailSentResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let summary = json.into_inner().into_summary()?;

    tracing::Span::current().record("order_id", summary.order_id.as_str());

    let recipient = summary.customer_email.clone();

    let customer_notified = app
        .notifier
        .send(&Notification::OrderConfirmation(summary.clone()), vec![recipient])
        .await;

    let admins_notified = app
        .notifier
        .send_to_admins(&Notification::AdminOrderAlert(summary))
        .await;

    if !admins_notified {
        warn!("admin order alert was not delivered");
    }

    if !customer_notified {
        return Err(send_failed("order confirmation"));
    }

    info!(admins_notified, "sent order emails");

    Ok(ApiResponse::ok(
        "Order emails sent",
        EmailSentResponse {
            customer_notified,
            admins_notified,
        },
    ))
}
