//! Clear Cart Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    extensions::*,
    responses::{ApiError, ApiResponse},
};

/// Clear Cart Handler
#[endpoint(tags("carts"), summary = "Clear Cart")]
#[tracing::instrument(
    name = "carts.clear",
    skip(user, depot),
    fields(user = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CartResponse>>, ApiError> {
    let app = &depot.state()?.app;
    let user = user.into_inner();

    tracing::Span::current().record("user", tracing::field::display(user));

    let cart = app.carts.clear_cart(user).await.map_err(into_api_error)?;

    Ok(ApiResponse::ok("Cart cleared", cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use mealbox::carts::Cart;
    use mealbox_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("carts/{user}").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_cart() -> TestResult {
        let user = Uuid::now_v7();
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(move |u| *u == user)
            .return_once(move |_| Ok(Cart::new(Uuid::now_v7(), Some(user))));

        let mut res = TestClient::delete(format!("http://example.com/carts/{user}"))
            .send(&make_service(carts))
            .await;

        let body: ApiResponse<CartResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.item_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_conflicts_return_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::Conflict));

        let res = TestClient::delete(format!("http://example.com/carts/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
