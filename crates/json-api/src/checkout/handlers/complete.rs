//! Complete Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use mealbox::validation::require_text;

use crate::{
    checkout::{
        errors::into_api_error,
        models::{CompleteCheckoutRequest, PlacedOrderResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Complete Checkout Handler
///
/// Verifies the payment for `reference` and places the order at the price
/// recorded when the payment started, then notifies the customer and admins.
/// A notification failure does not fail the request.
#[endpoint(
    tags("checkout"),
    summary = "Complete Checkout",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing reference"),
        (status_code = StatusCode::PAYMENT_REQUIRED, description = "Payment not successful"),
        (status_code = StatusCode::NOT_FOUND, description = "No checkout started with reference"),
        (status_code = StatusCode::CONFLICT, description = "Reference already used"),
    ),
)]
#[tracing::instrument(
    name = "checkout.complete",
    skip(json, depot, res),
    fields(reference = tracing::field::Empty, order_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<CompleteCheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<PlacedOrderResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let request = json.into_inner();
    let reference = require_text("reference", &request.reference)?;

    let span = tracing::Span::current();
    span.record("reference", reference);

    let placed = app
        .checkout
        .complete(reference)
        .await
        .map_err(into_api_error)?;

    span.record("order_id", tracing::field::display(placed.order.id));

    info!(
        amount = placed.order.amount,
        customer_notified = placed.customer_notified,
        admins_notified = placed.admins_notified,
        "order placed"
    );

    res.status_code(StatusCode::CREATED);

    Ok(ApiResponse::ok("Order placed", placed.into()))
}
