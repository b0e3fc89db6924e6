//! Merge Guest Cart Handler

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    carts::{
        errors::into_api_error,
        models::{CartResponse, MergeCartRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Merge Guest Cart Handler
///
/// Folds the lines of a browser-held guest cart into the signed-in user's cart.
/// Matching lines have their quantities summed and keep the account's price.
#[endpoint(tags("carts"), summary = "Merge Guest Cart")]
#[tracing::instrument(
    name = "carts.merge",
    skip(user, json, depot),
    fields(user = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<MergeCartRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let user = user.into_inner();
    let now = Timestamp::now();

    tracing::Span::current().record("user", tracing::field::display(user));

    let items: Vec<_> = json
        .into_inner()
        .items
        .into_iter()
        .map(|item| item.into_item(now))
        .collect();
    let merged = items.len();

    let cart = app
        .carts
        .merge_guest_cart(user, items)
        .await
        .map_err(into_api_error)?;

    info!(merged, lines = cart.items.len(), "merged guest cart");

    Ok(ApiResponse::ok("Guest cart merged", cart.into()))
}
