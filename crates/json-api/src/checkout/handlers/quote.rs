//! Checkout Quote Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    checkout::{
        errors::into_api_error,
        models::{OrderTotalResponse, QuoteRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Checkout Quote Handler
///
/// Prices delivery and tax for a subtotal, using the location override for
/// `state`/`lga` when one exists.
#[endpoint(tags("checkout"), summary = "Quote Order Total")]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderTotalResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let request = json.into_inner();
    let destination = request.destination()?;

    let total = app
        .checkout
        .quote(request.subtotal, destination)
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Order total calculated", total.into()))
}
