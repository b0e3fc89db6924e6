//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, ApiResponse},
};

/// Get Order Handler
///
/// Returns an order with its delivery record, for tracking pages.
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<OrderResponse>>, ApiError> {
    let app = &depot.state()?.app;

    let details = app
        .orders
        .get_order(order.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok(
        "Order retrieved",
        OrderResponse::new(details.order, details.delivery),
    ))
}
