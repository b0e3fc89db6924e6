//! Initialize Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    checkout::{
        errors::into_api_error,
        models::{CheckoutBody, CheckoutSessionResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Initialize Checkout Handler
///
/// Prices the basket from current recipe prices and starts a payment for the total.
#[endpoint(
    tags("checkout"),
    summary = "Start Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment started"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid basket or address"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
    ),
)]
#[tracing::instrument(
    name = "checkout.initialize",
    skip(json, depot),
    fields(items = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutBody>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CheckoutSessionResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let body = json.into_inner();

    tracing::Span::current().record("items", body.items.len());

    let session = app
        .checkout
        .initialize(body.into())
        .await
        .map_err(into_api_error)?;

    info!(
        reference = %session.reference,
        total = session.total.total,
        "started checkout payment"
    );

    Ok(ApiResponse::ok("Payment initialized", session.into()))
}
