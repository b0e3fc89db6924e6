//! Update Delivery Cost Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    admins::require_admin,
    delivery_costs::{
        errors::into_api_error,
        models::{LocationCostRequest, LocationCostResponse},
    },
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Update Delivery Cost Handler
#[endpoint(
    tags("delivery-costs"),
    summary = "Update Location Cost",
    responses(
        (status_code = StatusCode::OK, description = "Location updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Location not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field or negative cost"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing userId"),
        (status_code = StatusCode::FORBIDDEN, description = "userId is not an admin"),
    ),
)]
#[tracing::instrument(
    name = "delivery_costs.update",
    skip(json, depot),
    fields(
        actor = tracing::field::Empty,
        state = tracing::field::Empty,
        lga = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<LocationCostRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<LocationCostResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let request = json.into_inner();
    let actor = require_admin(app, request.user_id.as_deref()).await?;
    let (state, lga, cost) = request.into_parts()?;

    let span = tracing::Span::current();

    span.record("actor", tracing::field::display(actor));
    span.record("state", state.as_str());
    span.record("lga", lga.as_str());

    let location = app
        .delivery_costs
        .update_location(&state, &lga, cost)
        .await
        .map_err(into_api_error)?;

    info!(
        %actor,
        state = %location.state,
        lga = %location.lga,
        cost = location.cost,
        "updated location"
    );

    Ok(ApiResponse::ok("Location updated", location.into()))
}

#[cfg(test)]
mod tests {
    use mealbox::locations::LocationCost;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use mealbox_app::domain::delivery_costs::{
        DeliveryCostsServiceError, MockDeliveryCostsService,
    };

    use crate::{
        responses::ErrorResponse,
        test_helpers::{
            ADMIN_ID, delivery_costs_service, guarded_delivery_costs_service, no_admins,
        },
    };

    use super::*;

    fn make_service(costs: MockDeliveryCostsService) -> Service {
        delivery_costs_service(costs, Router::with_path("delivery-costs").put(handler))
    }

    #[tokio::test]
    async fn test_update_returns_200() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs
            .expect_update_location()
            .once()
            .withf(|_, _, cost| *cost == 450)
            .return_once(|_, _, _| {
                Ok(LocationCost {
                    state: "Lagos".to_string(),
                    lga: "Ikeja".to_string(),
                    cost: 450,
                })
            });

        let res = TestClient::put("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": 450 }))
            .send(&make_service(costs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_location_returns_404() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs
            .expect_update_location()
            .once()
            .return_once(|_, _, _| Err(DeliveryCostsServiceError::NotFound));

        let res = TestClient::put("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Epe", "cost": 450 }))
            .send(&make_service(costs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_user_returns_401() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_update_location().never();

        let mut res = TestClient::put("http://example.com/delivery-costs")
            .json(&json!({ "state": "Lagos", "lga": "Ikeja", "cost": 0 }))
            .send(&make_service(costs))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.message, "userId is required");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_admin_returns_403() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_update_location().never();

        let service = guarded_delivery_costs_service(
            costs,
            no_admins(),
            Router::with_path("delivery-costs").put(handler),
        );

        let res = TestClient::put("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": 0 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
