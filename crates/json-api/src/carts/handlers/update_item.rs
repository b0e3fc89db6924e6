//! Update Cart Item Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_api_error,
        models::{CartResponse, UpdateCartItemRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Update Cart Item Handler
#[endpoint(tags("carts"), summary = "Set Cart Item Quantity")]
#[tracing::instrument(
    name = "carts.items.update",
    skip(user, item, json, depot),
    fields(user = tracing::field::Empty, item = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    item: PathParam<String>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let user = user.into_inner();
    let item = item.into_inner();

    let span = tracing::Span::current();
    span.record("user", tracing::field::display(user));
    span.record("item", item.as_str());

    let cart = app
        .carts
        .update_quantity(user, &item, json.into_inner().quantity)
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Cart item updated", cart.into()))
}
