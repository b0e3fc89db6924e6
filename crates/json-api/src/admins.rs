//! Admin Authorisation
//!
//! Mutating admin endpoints name their caller with a `userId`, which must
//! belong to an admin account.

use uuid::Uuid;

use mealbox_app::{context::AppContext, domain::users::UsersServiceError};

use crate::responses::ApiError;

const FORBIDDEN: &str = "Admin privileges required";

/// Blank counts as absent. A value that is not a UUID cannot be an admin.
pub(crate) fn parse_actor(value: Option<&str>) -> Result<Option<Uuid>, ApiError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|_unparseable| ApiError::forbidden(FORBIDDEN))
}

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::Unauthenticated => ApiError::unauthorized("userId is required"),
        UsersServiceError::Forbidden => ApiError::forbidden(FORBIDDEN),
        UsersServiceError::Sql(source) => ApiError::dependency("user lookup failed", &source),
    }
}

/// The caller's id, provided it names an admin.
pub(crate) async fn require_admin(
    app: &AppContext,
    user_id: Option<&str>,
) -> Result<Uuid, ApiError> {
    let actor = parse_actor(user_id)?;

    app.users
        .authorize_admin(actor)
        .await
        .map_err(into_api_error)
}
