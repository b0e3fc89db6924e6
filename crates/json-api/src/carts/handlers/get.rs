//! Get Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Get Cart Handler
///
/// A user without a saved cart gets an empty one.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;

    let cart = app
        .carts
        .get_cart(user.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Cart retrieved", cart.into()))
}
