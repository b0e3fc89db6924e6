//! Create Delivery Cost Handler

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

/// Create Delivery Cost Handler
///
/// Adds a location, replacing its cost if it already exists.
#[endpoint(
    tags("delivery-costs"),
    summary = "Add Location",
    responses(
        (status_code = StatusCode::CREATED, description = "Location saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field or negative cost"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing userId"),
        (status_code = StatusCode::FORBIDDEN, description = "userId is not an admin"),
    ),
)]
#[tracing::instrument(
    name = "delivery_costs.create",
    skip(json, depot, res),
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
    res: &mut Response,
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
        .add_location(&state, &lga, cost)
        .await
        .map_err(into_api_error)?;

    info!(
        %actor,
        state = %location.state,
        lga = %location.lga,
        cost = location.cost,
        "added location"
    );

    res.status_code(StatusCode::CREATED);

    Ok(ApiResponse::ok("Location added", location.into()))
}

#[cfg(test)]
mod tests {
    use mealbox::{locations::LocationCost, validation::ValidationError};
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
        delivery_costs_service(costs, Router::with_path("delivery-costs").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_201() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs
            .expect_add_location()
            .once()
            .withf(|state, lga, cost| {
                state.to_string() == "Lagos" && lga.to_string() == "Ikeja" && *cost == 300
            })
            .return_once(|_, _, _| {
                Ok(LocationCost {
                    state: "Lagos".to_string(),
                    lga: "Ikeja".to_string(),
                    cost: 300,
                })
            });

        let mut res = TestClient::post("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": 300 }))
            .send(&make_service(costs))
            .await;

        let body: ApiResponse<LocationCostResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.data.cost, 300);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_field_returns_400_naming_it() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_add_location().never();

        let mut res = TestClient::post("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "cost": 300 }))
            .send(&make_service(costs))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "lga is required");

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_cost_returns_400() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_add_location().once().return_once(|_, _, _| {
            Err(DeliveryCostsServiceError::Validation(
                ValidationError::Negative { field: "cost" },
            ))
        });

        let mut res = TestClient::post("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": -5 }))
            .send(&make_service(costs))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "cost must not be negative");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_user_returns_401() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_add_location().never();

        let mut res = TestClient::post("http://example.com/delivery-costs")
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

        costs.expect_add_location().never();

        let service = guarded_delivery_costs_service(
            costs,
            no_admins(),
            Router::with_path("delivery-costs").post(handler),
        );

        let res = TestClient::post("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": 0 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_mistyped_cost_returns_400_naming_it() -> TestResult {
        let mut costs = MockDeliveryCostsService::new();

        costs.expect_add_location().never();

        let mut res = TestClient::post("http://example.com/delivery-costs")
            .json(&json!({ "userId": ADMIN_ID, "state": "Lagos", "lga": "Ikeja", "cost": "300" }))
            .send(&make_service(costs))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.message.starts_with("cost is invalid"), "message: {}", body.message);

        Ok(())
    }
}
