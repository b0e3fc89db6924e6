//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mealbox::carts::{Cart, CartError, CartItem, NewCartItem};
use mockall::automock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    carts::{CartsRepository, errors::CartsServiceError, models::AddCartItem},
    recipes::RecipesRepository,
};

/// Compare-and-swap attempts before a cart write gives up with a conflict.
const MAX_SAVE_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct DefaultCartsService {
    carts: Arc<dyn CartsRepository>,
    recipes: Arc<dyn RecipesRepository>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, recipes: Arc<dyn RecipesRepository>) -> Self {
        Self { carts, recipes }
    }

    /// Read-modify-write `user`'s cart, retrying when a concurrent writer wins.
    async fn modify<F>(&self, user: Uuid, mut change: F) -> Result<Cart, CartsServiceError>
    where
        F: FnMut(&mut Cart, Timestamp) -> Result<(), CartError> + Send,
    {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let (mut cart, version) = match self.carts.get_cart(user).await? {
                Some(stored) => (stored.cart, Some(stored.version)),
                None => (Cart::new(Uuid::now_v7(), Some(user)), None),
            };

            change(&mut cart, Timestamp::now())?;

            if let Some(saved) = self.carts.save_cart(user, &cart, version).await? {
                debug!(%user, version = saved.version, items = saved.cart.items.len(), "cart saved");

                return Ok(saved.cart);
            }

            warn!(attempt, %user, ?version, "cart version conflict");
        }

        Err(CartsServiceError::Conflict)
    }
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn get_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError> {
        Ok(self
            .carts
            .get_cart(user)
            .await?
            .map_or_else(|| Cart::new(Uuid::now_v7(), Some(user)), |stored| stored.cart))
    }

    async fn add_item(&self, user: Uuid, item: AddCartItem) -> Result<Cart, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity.into());
        }

        let recipe = self
            .recipes
            .get_recipes(&[item.recipe_id])
            .await?
            .into_iter()
            .find(|recipe| recipe.uuid == item.recipe_id)
            .ok_or(CartsServiceError::RecipeNotFound(item.recipe_id))?;

        let line = NewCartItem {
            recipe_id: recipe.uuid,
            name: recipe.name,
            price: recipe.price,
            quantity: item.quantity,
            packaging: item.packaging,
            image_url: recipe.image_url,
        };

        self.modify(user, |cart, at| cart.add_item(line.clone(), at).map(|_| ()))
            .await
    }

    async fn update_quantity(
        &self,
        user: Uuid,
        item_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        self.modify(user, |cart, at| {
            cart.set_quantity(item_id, quantity, at).map(|_| ())
        })
        .await
    }

    async fn remove_item(&self, user: Uuid, item_id: &str) -> Result<Cart, CartsServiceError> {
        self.modify(user, |cart, _| cart.remove_item(item_id).map(|_| ()))
            .await
    }

    async fn clear_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError> {
        self.modify(user, |cart, _| {
            cart.clear();
            Ok(())
        })
        .await
    }

    async fn merge_guest_cart(
        &self,
        user: Uuid,
        items: Vec<CartItem>,
    ) -> Result<Cart, CartsServiceError> {
        self.modify(user, |cart, at| {
            cart.merge_guest_items(items.clone(), at);
            Ok(())
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart, or an empty one if nothing has been saved.
    async fn get_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError>;

    /// Add a recipe, snapshotting its current name, price and image.
    async fn add_item(&self, user: Uuid, item: AddCartItem) -> Result<Cart, CartsServiceError>;

    /// Set the quantity of one line.
    async fn update_quantity(
        &self,
        user: Uuid,
        item_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one line.
    async fn remove_item(&self, user: Uuid, item_id: &str) -> Result<Cart, CartsServiceError>;

    /// Remove every line.
    async fn clear_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError>;

    /// Fold a guest cart into the user's cart at sign-in.
    async fn merge_guest_cart(
        &self,
        user: Uuid,
        items: Vec<CartItem>,
    ) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{carts::MockCartsRepository, recipes::models::Recipe},
        test::memory::{MemoryCartsRepository, MemoryRecipesRepository},
    };

    struct Harness {
        service: DefaultCartsService,
        recipe: Recipe,
        user: Uuid,
    }

    fn harness() -> Harness {
        let recipe = Recipe {
            uuid: Uuid::now_v7(),
            name: "Jollof Rice Kit".to_string(),
            price: 250_000,
            image_url: Some("https://cdn.example/jollof.jpg".to_string()),
        };

        Harness {
            service: DefaultCartsService::new(
                Arc::new(MemoryCartsRepository::default()),
                Arc::new(MemoryRecipesRepository::with_recipes([recipe.clone()])),
            ),
            recipe,
            user: Uuid::now_v7(),
        }
    }

    fn add(recipe: Uuid, quantity: u32) -> AddCartItem {
        AddCartItem {
            recipe_id: recipe,
            quantity,
            packaging: None,
        }
    }

    #[tokio::test]
    async fn missing_cart_reads_as_empty() -> TestResult {
        let harness = harness();

        let cart = harness.service.get_cart(harness.user).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.user_id, Some(harness.user));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_snapshots_recipe() -> TestResult {
        let harness = harness();

        let cart = harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 2))
            .await?;

        let Some(line) = cart.items.first() else {
            panic!("expected one line");
        };

        assert_eq!(line.name, "Jollof Rice Kit");
        assert_eq!(line.price, 250_000);
        assert_eq!(line.image_url, harness.recipe.image_url);
        assert_eq!(cart.subtotal(), 500_000);
        assert_eq!(harness.service.get_cart(harness.user).await?, cart);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_recipe_twice_merges_lines() -> TestResult {
        let harness = harness();

        harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 1))
            .await?;
        let cart = harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 2))
            .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_recipe_is_rejected() {
        let harness = harness();
        let unknown = Uuid::now_v7();

        let result = harness.service.add_item(harness.user, add(unknown, 1)).await;

        assert!(matches!(result, Err(CartsServiceError::RecipeNotFound(id)) if id == unknown));
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_lookup() {
        let mut carts = MockCartsRepository::new();
        carts.expect_get_cart().never();
        carts.expect_save_cart().never();

        let service = DefaultCartsService::new(
            Arc::new(carts),
            Arc::new(MemoryRecipesRepository::default()),
        );

        let result = service.add_item(Uuid::now_v7(), add(Uuid::now_v7(), 0)).await;

        assert!(matches!(
            result,
            Err(CartsServiceError::Cart(CartError::InvalidQuantity))
        ));
    }

    #[tokio::test]
    async fn update_and_remove_lines() -> TestResult {
        let harness = harness();
        let cart = harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 1))
            .await?;
        let Some(item_id) = cart.items.first().map(|line| line.id.clone()) else {
            panic!("expected one line");
        };

        let updated = harness
            .service
            .update_quantity(harness.user, &item_id, 4)
            .await?;

        assert_eq!(updated.item_count(), 4);

        let removed = harness.service.remove_item(harness.user, &item_id).await?;

        assert!(removed.is_empty());

        let missing = harness.service.remove_item(harness.user, &item_id).await;

        assert!(matches!(
            missing,
            Err(CartsServiceError::Cart(CartError::ItemNotFound(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_the_cart() -> TestResult {
        let harness = harness();
        harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 3))
            .await?;

        harness.service.clear_cart(harness.user).await?;

        assert!(harness.service.get_cart(harness.user).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn merge_sums_matching_lines_and_keeps_account_price() -> TestResult {
        let harness = harness();
        let account = harness
            .service
            .add_item(harness.user, add(harness.recipe.uuid, 1))
            .await?;
        let Some(mut guest_line) = account.items.first().cloned() else {
            panic!("expected one line");
        };
        guest_line.quantity = 2;
        guest_line.price = 1;

        let merged = harness
            .service
            .merge_guest_cart(harness.user, vec![guest_line])
            .await?;

        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.item_count(), 3);
        assert_eq!(merged.subtotal(), 750_000);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_are_not_lost() -> TestResult {
        let harness = harness();

        let adds = (0..3).map(|_| {
            let service = harness.service.clone();
            let user = harness.user;
            let recipe = harness.recipe.uuid;
            tokio::spawn(async move { service.add_item(user, add(recipe, 1)).await })
        });

        let mut succeeded = 0;

        for result in adds.collect::<Vec<_>>() {
            if result.await?.is_ok() {
                succeeded += 1;
            }
        }

        let cart = harness.service.get_cart(harness.user).await?;

        assert_eq!(cart.item_count(), succeeded);

        Ok(())
    }

    #[tokio::test]
    async fn gives_up_after_repeated_conflicts() {
        let mut carts = MockCartsRepository::new();
        carts
            .expect_get_cart()
            .times(MAX_SAVE_ATTEMPTS)
            .returning(|_| Ok(None));
        carts
            .expect_save_cart()
            .times(MAX_SAVE_ATTEMPTS)
            .returning(|_, _, _| Ok(None));

        let service = DefaultCartsService::new(
            Arc::new(carts),
            Arc::new(MemoryRecipesRepository::default()),
        );

        let result = service.clear_cart(Uuid::now_v7()).await;

        assert!(matches!(result, Err(CartsServiceError::Conflict)));
    }
}
