//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mealbox::{
    delivery::DeliveryRecord,
    notifications::{LineItem, Notification, OrderSummary, StatusUpdate},
    orders::{DeliveryStatus, Order, OrderDraft},
};
use mockall::automock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        orders::{
            OrdersRepository,
            errors::OrdersServiceError,
            models::{
                NewOrder, NewOrderRecord, OrderDetails, PlacedOrder, StatusTransition,
                TransactionRecord,
            },
        },
        users::{UsersRepository, require_admin},
    },
    notifications::Notifier,
};

#[derive(Clone)]
pub struct DefaultOrdersService {
    orders: Arc<dyn OrdersRepository>,
    users: Arc<dyn UsersRepository>,
    notifier: Arc<dyn Notifier>,
    site_url: String,
}

impl DefaultOrdersService {
    /// `site_url` is the public storefront base used for tracking links.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        users: Arc<dyn UsersRepository>,
        notifier: Arc<dyn Notifier>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            users,
            notifier,
            site_url: site_url.into(),
        }
    }

    fn tracking_url(&self, order: Uuid) -> String {
        format!("{}/orders/{order}", self.site_url.trim_end_matches('/'))
    }

    async fn notify_status_change(&self, order: &Order, previous: DeliveryStatus) -> bool {
        let delivery = match self.orders.get_delivery(order.delivery_id).await {
            Ok(Some(delivery)) => delivery,
            Ok(None) => {
                warn!(order_id = %order.id, "delivery record missing, status email skipped");

                return false;
            }
            Err(error) => {
                error!(order_id = %order.id, %error, "failed to load delivery, status email skipped");

                return false;
            }
        };

        let notification = Notification::StatusUpdate(StatusUpdate {
            order_id: order.id.to_string(),
            customer_name: delivery.address.name,
            previous_status: Some(previous),
            current_status: order.delivery_status,
            tracking_url: self.tracking_url(order.id),
        });

        let sent = self
            .notifier
            .send(&notification, vec![delivery.address.email])
            .await;

        if !sent {
            warn!(order_id = %order.id, kind = %notification.kind(), "customer notification not delivered");
        }

        sent
    }
}

#[async_trait]
impl OrdersService for DefaultOrdersService {
    async fn create_order(&self, new_order: NewOrder) -> Result<PlacedOrder, OrdersServiceError> {
        new_order.address.validate()?;

        let now = Timestamp::now();
        let draft = OrderDraft {
            id: Uuid::now_v7(),
            user_id: new_order.user_id,
            recipe_ids: new_order
                .lines
                .iter()
                .flat_map(|line| (0..line.quantity).map(|_| line.recipe_id))
                .collect(),
            amount: new_order.amount,
            delivery_id: Uuid::now_v7(),
            transaction_id: Uuid::now_v7(),
        };

        let order = Order::place(draft, now)?;
        let delivery = DeliveryRecord::new(order.delivery_id, new_order.address.clone(), now);
        let transaction = TransactionRecord {
            uuid: order.transaction_id,
            reference: new_order.payment.reference,
            user_id: new_order.user_id,
            amount: new_order.amount,
            status: new_order.payment.status,
            created_at: now,
        };

        let record = NewOrderRecord {
            order,
            delivery,
            transaction,
        };

        self.orders.create_order(&record).await?;

        info!(
            order_id = %record.order.id,
            amount = record.order.amount,
            recipes = record.order.recipe_ids.len(),
            "order placed"
        );

        let summary = OrderSummary {
            order_id: record.order.id.to_string(),
            customer_name: new_order.address.name.clone(),
            customer_email: new_order.address.email.clone(),
            amount: record.order.amount,
            items: new_order.lines.iter().map(LineItem::from).collect(),
            address: new_order.address,
        };

        let customer_notified = self
            .notifier
            .send(
                &Notification::OrderConfirmation(summary.clone()),
                vec![summary.customer_email.clone()],
            )
            .await;

        let admins_notified = self
            .notifier
            .send_to_admins(&Notification::AdminOrderAlert(summary))
            .await;

        if !customer_notified || !admins_notified {
            warn!(
                order_id = %record.order.id,
                customer_notified,
                admins_notified,
                "order notifications incomplete"
            );
        }

        Ok(PlacedOrder {
            order: record.order,
            delivery: record.delivery,
            customer_notified,
            admins_notified,
        })
    }

    async fn get_order(&self, order: Uuid) -> Result<OrderDetails, OrdersServiceError> {
        let order = self
            .orders
            .get_order(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let delivery = self
            .orders
            .get_delivery(order.delivery_id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        Ok(OrderDetails { order, delivery })
    }

    async fn update_delivery_status(
        &self,
        actor: Option<Uuid>,
        order_id: Uuid,
        status: DeliveryStatus,
    ) -> Result<StatusTransition, OrdersServiceError> {
        let actor = require_admin(self.users.as_ref(), actor).await?;

        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let change = order.apply_status(status, Timestamp::now())?;

        let Some(updated) = self.orders.transition_status(order_id, change).await? else {
            // Lost the race: report against whatever status won.
            let current = self
                .orders
                .get_order(order_id)
                .await?
                .ok_or(OrdersServiceError::NotFound)?;

            current.delivery_status.check_transition(status)?;

            return Err(OrdersServiceError::ConcurrentUpdate);
        };

        info!(
            order_id = %order_id,
            %actor,
            from = %change.previous,
            to = %change.current,
            "delivery status changed"
        );

        let customer_notified = self.notify_status_change(&updated, change.previous).await;

        Ok(StatusTransition {
            order: updated,
            change,
            customer_notified,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist an order with its delivery and transaction, then notify the
    /// customer and admins. Notification failures never fail the call.
    async fn create_order(&self, new_order: NewOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// Retrieve an order and its delivery record.
    async fn get_order(&self, order: Uuid) -> Result<OrderDetails, OrdersServiceError>;

    /// Move an order along the delivery state machine on behalf of an admin.
    async fn update_delivery_status(
        &self,
        actor: Option<Uuid>,
        order: Uuid,
        status: DeliveryStatus,
    ) -> Result<StatusTransition, OrdersServiceError>;
}
