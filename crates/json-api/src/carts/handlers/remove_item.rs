//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Remove Cart Item Handler
#[endpoint(tags("carts"), summary = "Remove Cart Item")]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    item: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;

    let cart = app
        .carts
        .remove_item(user.into_inner(), &item.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Cart item removed", cart.into()))
}
