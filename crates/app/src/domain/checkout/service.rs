//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mealbox::{delivery::Destination, orders::OrderError, rules::OrderTotal};
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        business_rules::BusinessRulesService,
        carts::CartsService,
        checkout::{
            CheckoutsRepository,
            errors::CheckoutServiceError,
            models::{CheckoutRequest, CheckoutSession, PendingCheckout, PricedCheckout},
        },
        orders::{
            OrdersService,
            models::{NewOrder, OrderLine, PaymentReceipt, PlacedOrder},
        },
        recipes::RecipesRepository,
    },
    payments::{PaymentGateway, PaymentInit},
};

#[derive(Clone)]
pub struct DefaultCheckoutService {
    checkouts: Arc<dyn CheckoutsRepository>,
    recipes: Arc<dyn RecipesRepository>,
    rules: Arc<dyn BusinessRulesService>,
    orders: Arc<dyn OrdersService>,
    carts: Arc<dyn CartsService>,
    gateway: Arc<dyn PaymentGateway>,
    callback_url: Option<String>,
}

impl DefaultCheckoutService {
    #[must_use]
    pub fn new(
        checkouts: Arc<dyn CheckoutsRepository>,
        recipes: Arc<dyn RecipesRepository>,
        rules: Arc<dyn BusinessRulesService>,
        orders: Arc<dyn OrdersService>,
        carts: Arc<dyn CartsService>,
        gateway: Arc<dyn PaymentGateway>,
        callback_url: Option<String>,
    ) -> Self {
        Self {
            checkouts,
            recipes,
            rules,
            orders,
            carts,
            gateway,
            callback_url,
        }
    }

    /// Price `request` from current catalogue prices and business rules.
    async fn price(
        &self,
        request: &CheckoutRequest,
    ) -> Result<PricedCheckout, CheckoutServiceError> {
        request.address.validate()?;

        if request.items.is_empty() {
            return Err(OrderError::NoRecipes.into());
        }

        if let Some(item) = request.items.iter().find(|item| item.quantity == 0) {
            return Err(CheckoutServiceError::InvalidQuantity(item.recipe_id));
        }

        let ids: Vec<Uuid> = request.items.iter().map(|item| item.recipe_id).collect();
        let recipes = self.recipes.get_recipes(&ids).await?;

        let lines = request
            .items
            .iter()
            .map(|item| {
                recipes
                    .iter()
                    .find(|recipe| recipe.uuid == item.recipe_id)
                    .map(|recipe| OrderLine {
                        recipe_id: recipe.uuid,
                        name: recipe.name.clone(),
                        quantity: item.quantity,
                        price: recipe.price,
                    })
                    .ok_or(CheckoutServiceError::RecipeNotFound(item.recipe_id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = lines.iter().fold(0_u64, |total, line| {
            total.saturating_add(line.price.saturating_mul(u64::from(line.quantity)))
        });

        let total = self
            .rules
            .compute_order_total(subtotal, Some(request.address.destination()))
            .await?;

        Ok(PricedCheckout { lines, total })
    }
}

#[async_trait]
impl CheckoutService for DefaultCheckoutService {
    async fn quote(
        &self,
        subtotal: u64,
        destination: Option<Destination>,
    ) -> Result<OrderTotal, CheckoutServiceError> {
        Ok(self.rules.compute_order_total(subtotal, destination).await?)
    }

    async fn initialize(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutServiceError> {
        let priced = self.price(&request).await?;
        let reference = format!("mbx-{}", Uuid::now_v7().simple());

        let session = self
            .gateway
            .initialize(PaymentInit {
                email: request.address.email.clone(),
                amount: priced.total.total,
                reference,
                callback_url: self.callback_url.clone(),
            })
            .await?;

        self.checkouts
            .save_checkout(&PendingCheckout {
                reference: session.reference.clone(),
                user_id: request.user_id,
                lines: priced.lines,
                address: request.address,
                total: priced.total,
            })
            .await?;

        info!(
            reference = %session.reference,
            total = priced.total.total,
            "payment initialised"
        );

        Ok(CheckoutSession {
            reference: session.reference,
            authorization_url: session.authorization_url,
            access_code: session.access_code,
            total: priced.total,
        })
    }

    async fn complete(&self, reference: &str) -> Result<PlacedOrder, CheckoutServiceError> {
        let checkout = self
            .checkouts
            .get_checkout(reference)
            .await?
            .ok_or_else(|| CheckoutServiceError::UnknownReference(reference.to_string()))?;

        let payment = self.gateway.verify(reference).await?;

        if !payment.is_successful() {
            return Err(CheckoutServiceError::PaymentNotSuccessful {
                reference: payment.reference,
                status: payment.status,
            });
        }

        let expected = checkout.total.total;

        if payment.amount != expected {
            warn!(
                reference,
                expected,
                paid = payment.amount,
                "payment amount mismatch"
            );

            return Err(CheckoutServiceError::AmountMismatch {
                expected,
                paid: payment.amount,
            });
        }

        let placed = self
            .orders
            .create_order(NewOrder {
                user_id: checkout.user_id,
                lines: checkout.lines,
                amount: expected,
                address: checkout.address,
                payment: PaymentReceipt {
                    reference: payment.reference,
                    status: payment.status,
                },
            })
            .await?;

        if let Some(user) = checkout.user_id
            && let Err(error) = self.carts.clear_cart(user).await
        {
            warn!(
                %user,
                order_id = %placed.order.id,
                %error,
                "failed to clear cart after checkout"
            );
        }

        Ok(placed)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Order total for `subtotal` delivered to `destination`.
    async fn quote(
        &self,
        subtotal: u64,
        destination: Option<Destination>,
    ) -> Result<OrderTotal, CheckoutServiceError>;

    /// Price the basket, start a payment for its total and record the priced
    /// checkout under the payment reference.
    async fn initialize(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutServiceError>;

    /// Verify the payment with `reference` and place the order it paid for, at
    /// the price recorded when the payment started.
    async fn complete(&self, reference: &str) -> Result<PlacedOrder, CheckoutServiceError>;
}
