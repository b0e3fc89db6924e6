//! Cart Errors

use mealbox::carts::CartError;
use mealbox_app::domain::carts::CartsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::Cart(CartError::InvalidQuantity) => {
            ApiError::bad_request("quantity must be at least 1")
        }
        CartsServiceError::Cart(CartError::ItemNotFound(_))
        | CartsServiceError::RecipeNotFound(_) => ApiError::not_found(error.to_string()),
        CartsServiceError::Conflict => ApiError::conflict(error.to_string()),
        CartsServiceError::NotFound => ApiError::not_found("Cart not found"),
        CartsServiceError::InvalidReference => ApiError::bad_request("Unknown user"),
        CartsServiceError::InvalidData => ApiError::bad_request("Invalid cart payload"),
        CartsServiceError::Sql(source) => ApiError::dependency("cart storage failed", &source),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_line_and_recipe_are_not_found() {
        let line = into_api_error(CartsServiceError::Cart(CartError::ItemNotFound(
            "abc-1".to_string(),
        )));
        let recipe = into_api_error(CartsServiceError::RecipeNotFound(Uuid::nil()));

        assert_eq!(line.status, StatusCode::NOT_FOUND);
        assert_eq!(line.message, "cart item abc-1 not found");
        assert_eq!(recipe.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn lost_update_is_a_conflict() {
        assert_eq!(
            into_api_error(CartsServiceError::Conflict).status,
            StatusCode::CONFLICT
        );
    }
}
