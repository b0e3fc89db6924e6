//! Delete Delivery Cost Handler

use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::info;

use crate::{
    admins::require_admin,
    delivery_costs::{errors::into_api_error, models::RemovedLocationResponse},
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Delete Delivery Cost Handler
///
/// Admin only, with the caller in `?userId=`. Removes one location. A state
/// disappears once its last LGA is removed.
#[endpoint(
    tags("delivery-costs"),
    summary = "Remove Location",
    responses(
        (status_code = StatusCode::OK, description = "Location removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Location not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing state or lga"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing userId"),
        (status_code = StatusCode::FORBIDDEN, description = "userId is not an admin"),
    ),
)]
#[tracing::instrument(
    name = "delivery_costs.delete",
    skip(state, lga, req, depot),
    fields(actor = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    state: QueryParam<String, false>,
    lga: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<RemovedLocationResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let user_id = req.query::<String>("userId");
    let actor = require_admin(app, user_id.as_deref()).await?;

    tracing::Span::current().record("actor", tracing::field::display(actor));

    let state = state.into_inner().unwrap_or_default();
    let lga = lga.into_inner().unwrap_or_default();

    app.delivery_costs
        .remove_location(&state, &lga)
        .await
        .map_err(into_api_error)?;

    info!(%actor, state = %state, lga = %lga, "removed location");

    Ok(ApiResponse::ok(
        "Location removed",
        RemovedLocationResponse { state, lga },
    ))
}
