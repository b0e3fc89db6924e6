//! Get Business Rules Handler

use salvo::prelude::*;

use crate::{
    business_rules::{errors::into_api_error, models::BusinessRulesResponse},
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Get Business Rules Handler
///
/// Returns the current delivery fee and tax policy, creating the defaults on first read.
#[endpoint(tags("business-rules"), summary = "Get Business Rules")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<BusinessRulesResponse>>, ApiError> {
    let state = depot.state()?;

    let rules = state
        .app
        .business_rules
        .get_rules()
        .await
        .map_err(into_api_error)?;

    Ok(ApiResponse::ok("Business rules retrieved", rules.into()))
}
