//! Update Business Rules Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use mealbox::rules::BusinessRulesUpdate;

use crate::{
    admins::require_admin,
    business_rules::{
        errors::into_api_error,
        models::{BusinessRulesResponse, UpdateBusinessRulesRequest},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Update Business Rules Handler
///
/// Admin only. Validates every supplied field before anything is written.
#[endpoint(
    tags("business-rules"),
    summary = "Update Business Rules",
    responses(
        (status_code = StatusCode::OK, description = "Business rules updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid field"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing userId"),
        (status_code = StatusCode::FORBIDDEN, description = "userId is not an admin"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent update"),
    ),
)]
#[tracing::instrument(
    name = "business_rules.update",
    skip(json, depot),
    fields(
        actor = tracing::field::Empty,
        delivery_fee = tracing::field::Empty,
        tax_rate = tracing::field::Empty,
        tax_enabled = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateBusinessRulesRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BusinessRulesResponse>>, ApiError> {
    let state = depot.state()?;
    let request = json.into_inner();
    let actor = require_admin(&state.app, request.user_id.as_deref()).await?;
    let update = BusinessRulesUpdate::try_from(request)?;

    if update.is_empty() {
        return Err(ApiError::bad_request(
            "At least one of deliveryFee, taxRate or taxEnabled is required",
        ));
    }

    let span = tracing::Span::current();

    span.record("actor", tracing::field::display(actor));

    if let Some(fee) = update.delivery_fee {
        span.record("delivery_fee", fee);
    }

    if let Some(rate) = update.tax_rate {
        span.record("tax_rate", tracing::field::display(rate));
    }

    if let Some(enabled) = update.tax_enabled {
        span.record("tax_enabled", enabled);
    }

    let rules = state
        .app
        .business_rules
        .update_rules(update)
        .await
        .map_err(into_api_error)?;

    info!(
        %actor,
        delivery_fee = rules.delivery_fee,
        tax_rate = %rules.tax_rate,
        tax_enabled = rules.tax_enabled,
        "updated business rules"
    );

    Ok(ApiResponse::ok("Business rules updated", rules.into()))
}
