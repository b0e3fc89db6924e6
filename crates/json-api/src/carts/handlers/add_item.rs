//! Add Cart Item Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use mealbox_app::domain::carts::models::AddCartItem;

use crate::{
    carts::{
        errors::into_api_error,
        models::{AddCartItemRequest, CartResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Add Cart Item Handler
///
/// Snapshots the recipe's current name and price onto the line. Adding a recipe
/// already in the cart with the same packaging increases that line's quantity.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart changed concurrently"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.add",
    skip(user, json, depot),
    fields(
        user = tracing::field::Empty,
        recipe_id = tracing::field::Empty,
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let user = user.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();
    span.record("user", tracing::field::display(user));
    span.record("recipe_id", tracing::field::display(request.recipe_id));

    let cart = app
        .carts
        .add_item(
            user,
            AddCartItem {
                recipe_id: request.recipe_id,
                quantity: request.quantity,
                packaging: request.packaging,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Item added to cart", cart.into()))
}
