//! Get Delivery Costs Handler

use salvo::{oapi::extract::QueryParam, prelude::*};

use mealbox::validation::{ValidationError, require_text};

use crate::{
    delivery_costs::{
        errors::into_api_error,
        models::{CostLookupResponse, DeliveryCostsAction, DeliveryCostsData, LocationCostResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

fn required_param(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;

    require_text(field, &value)?;

    Ok(value)
}

/// Get Delivery Costs Handler
///
/// `action` selects the read: `states`, `lgas` (needs `state`), `cost` (needs
/// `state` and `lga`) or `all-locations`, which is also the default.
#[endpoint(
    tags("delivery-costs"),
    summary = "Read Delivery Costs",
    responses(
        (status_code = StatusCode::OK, description = "Delivery cost data"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown action or missing parameter"),
    ),
)]
#[tracing::instrument(
    name = "delivery_costs.get",
    skip(action, state, lga, depot),
    fields(action = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    action: QueryParam<String, false>,
    state: QueryParam<String, false>,
    lga: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<DeliveryCostsData>>, ApiError> {
    let app = &depot.state()?.app;

    let action = action
        .into_inner()
        .map(|action| action.parse::<DeliveryCostsAction>())
        .transpose()?
        .unwrap_or(DeliveryCostsAction::AllLocations);

    tracing::Span::current().record("action", tracing::field::debug(action));

    let data = match action {
        DeliveryCostsAction::States => DeliveryCostsData::Names(
            app.delivery_costs
                .list_states()
                .await
                .map_err(into_api_error)?,
        ),
        DeliveryCostsAction::Lgas => {
            let state = required_param("state", state.into_inner())?;

            DeliveryCostsData::Names(
                app.delivery_costs
                    .list_lgas(&state)
                    .await
                    .map_err(into_api_error)?,
            )
        }
        DeliveryCostsAction::Cost => {
            let state = required_param("state", state.into_inner())?;
            let lga = required_param("lga", lga.into_inner())?;

            let cost = app
                .delivery_costs
                .get_cost(&state, &lga)
                .await
                .map_err(into_api_error)?;

            DeliveryCostsData::Cost(CostLookupResponse { state, lga, cost })
        }
        DeliveryCostsAction::AllLocations => DeliveryCostsData::Locations(
            app.delivery_costs
                .all_locations()
                .await
                .map_err(into_api_error)?
                .into_iter()
                .map(LocationCostResponse::from)
                .collect(),
        ),
    };

    Ok(ApiResponse::ok("Delivery costs retrieved", data))
}
