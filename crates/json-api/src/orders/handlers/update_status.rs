//! Update Delivery Status Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;
use uuid::Uuid;

use mealbox::{
    orders::{DeliveryStatus, UnknownStatus},
    validation::ValidationError,
};

use crate::{
    admins::parse_actor,
    extensions::*,
    observability::observe_status_transition,
    orders::{
        errors::into_api_error,
        models::{StatusChangeResponse, UpdateStatusRequest},
    },
    responses::{ApiError, ApiResponse},
};

fn parse_status(value: Option<String>) -> Result<DeliveryStatus, ValidationError> {
    let value = value.ok_or(ValidationError::Missing {
        field: "deliveryStatus",
    })?;

    value
        .parse()
        .map_err(|source: UnknownStatus| ValidationError::Invalid {
            field: "deliveryStatus",
            reason: source.to_string(),
        })
}

fn parse_order_id(value: Option<String>) -> Result<Uuid, ApiError> {
    let value = value.ok_or(ValidationError::Missing { field: "orderId" })?;

    // No order can have an id that is not a UUID.
    Uuid::parse_str(value.trim()).map_err(|_unparseable| ApiError::not_found("Order not found"))
}

/// Update Delivery Status Handler
///
/// Moves an order one step along its delivery lifecycle on behalf of an admin,
/// then emails the customer. The change stands even if the email fails.
#[endpoint(
    tags("orders"),
    summary = "Update Delivery Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown, repeated or skipped status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing userId"),
        (status_code = StatusCode::FORBIDDEN, description = "userId is not an admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent update"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(json, depot),
    fields(
        order_id = tracing::field::Empty,
        delivery_status = tracing::field::Empty,
        actor = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<StatusChangeResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let request = json.into_inner();

    let order_id = parse_order_id(request.order_id)?;
    let status = parse_status(request.delivery_status)?;
    let actor = parse_actor(request.user_id.as_deref())?;

    let span = tracing::Span::current();

    span.record("order_id", tracing::field::display(order_id));
    span.record("delivery_status", status.as_str());

    if let Some(actor) = actor {
        span.record("actor", tracing::field::display(actor));
    }

    let transition = app
        .orders
        .update_delivery_status(actor, order_id, status)
        .await
        .map_err(into_api_error)?;

    let change = transition.change;

    observe_status_transition(change.previous, change.current);

    info!(
        order_id = %order_id,
        from = change.previous.as_str(),
        to = change.current.as_str(),
        customer_notified = transition.customer_notified,
        "updated delivery status"
    );

    Ok(ApiResponse::ok(
        format!("Order is now {}", change.current.display_name()),
        StatusChangeResponse {
            order_id,
            previous_status: change.previous.as_str().to_string(),
            current_status: change.current.as_str().to_string(),
            customer_notified: transition.customer_notified,
        },
    ))
}
