//! Notification Dispatcher

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mealbox::notifications::{EmailMessage, Notification};
use mockall::automock;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::{domain::users::UsersRepository, notifications::EmailProvider};

/// Best-effort notification delivery.
///
/// Both methods report success as a flag and never fail the caller.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render `notification` and deliver it to `recipients`.
    async fn send(&self, notification: &Notification, recipients: Vec<String>) -> bool;

    /// Deliver `notification` to every admin.
    async fn send_to_admins(&self, notification: &Notification) -> bool;
}

/// Sends through an ordered provider chain, stopping at the first success.
#[derive(Clone)]
pub struct NotificationDispatcher {
    providers: Vec<Arc<dyn EmailProvider>>,
    users: Arc<dyn UsersRepository>,
    attempt_timeout: Duration,
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(
        providers: Vec<Arc<dyn EmailProvider>>,
        users: Arc<dyn UsersRepository>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            users,
            attempt_timeout,
        }
    }

    async fn deliver(&self, message: &EmailMessage) -> bool {
        for provider in &self.providers {
            match timeout(self.attempt_timeout, provider.send(message)).await {
                Ok(Ok(())) => {
                    info!(
                        provider = provider.name(),
                        recipients = message.to.len(),
                        "email sent"
                    );

                    return true;
                }
                Ok(Err(error)) => {
                    warn!(provider = provider.name(), %error, "email provider failed");
                }
                Err(_) => {
                    warn!(
                        provider = provider.name(),
                        timeout_ms = self.attempt_timeout.as_millis(),
                        "email provider timed out"
                    );
                }
            }
        }

        false
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    async fn send(&self, notification: &Notification, recipients: Vec<String>) -> bool {
        let kind = notification.kind();

        if recipients.is_empty() {
            warn!(%kind, "notification has no recipients");

            return false;
        }

        let message = match notification.to_message(recipients) {
            Ok(message) => message,
            Err(error) => {
                error!(%kind, %error, "failed to render notification");

                return false;
            }
        };

        let sent = self.deliver(&message).await;

        if !sent {
            error!(
                %kind,
                providers = self.providers.len(),
                "all email providers failed"
            );
        }

        sent
    }

    async fn send_to_admins(&self, notification: &Notification) -> bool {
        let admins = match self.users.list_admins().await {
            Ok(admins) => admins,
            Err(error) => {
                error!(kind = %notification.kind(), %error, "failed to load admin recipients");

                return false;
            }
        };

        let recipients = admins.into_iter().map(|admin| admin.email).collect();

        self.send(notification, recipients).await
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mealbox::{
        delivery::DeliveryAddress,
        notifications::{ContactMessage, LineItem, OrderSummary},
    };
    use mockall::predicate::always;

    use super::*;
    use crate::{
        domain::users::{
            MockUsersRepository,
            models::{Role, User},
        },
        notifications::{EmailProviderError, MockEmailProvider},
    };

    fn contact() -> Notification {
        Notification::ContactForm(ContactMessage {
            name: "Tunde".to_string(),
            email: "tunde@example.com".to_string(),
            subject: "Bulk order".to_string(),
            message: "Can I order 40 kits?".to_string(),
        })
    }

    fn provider_ok(name: &'static str, times: usize) -> MockEmailProvider {
        let mut provider = MockEmailProvider::new();

        provider.expect_name().return_const(name);
        provider
            .expect_send()
            .with(always())
            .times(times)
            .returning(|_| Ok(()));

        provider
    }

    fn provider_failing(name: &'static str) -> MockEmailProvider {
        let mut provider = MockEmailProvider::new();

        provider.expect_name().return_const(name);
        provider.expect_send().times(1).returning(|_| {
            Err(EmailProviderError::Rejected {
                status: 500,
                body: "unavailable".to_string(),
            })
        });

        provider
    }

    fn dispatcher(providers: Vec<MockEmailProvider>) -> NotificationDispatcher {
        NotificationDispatcher::new(
            providers
                .into_iter()
                .map(|provider| Arc::new(provider) as Arc<dyn EmailProvider>)
                .collect(),
            Arc::new(MockUsersRepository::new()),
            Duration::from_secs(1),
        )
    }

    fn recipients() -> Vec<String> {
        vec!["ada@example.com".to_string()]
    }

    #[tokio::test]
    async fn first_provider_success_skips_the_rest() {
        let dispatcher = dispatcher(vec![provider_ok("resend", 1), provider_ok("brevo", 0)]);

        assert!(dispatcher.send(&contact(), recipients()).await);
    }

    #[tokio::test]
    async fn falls_back_to_next_provider_on_failure() {
        let dispatcher = dispatcher(vec![provider_failing("resend"), provider_ok("brevo", 1)]);

        assert!(dispatcher.send(&contact(), recipients()).await);
    }

    #[tokio::test]
    async fn reports_failure_when_every_provider_fails() {
        let dispatcher = dispatcher(vec![provider_failing("resend"), provider_failing("brevo")]);

        assert!(!dispatcher.send(&contact(), recipients()).await);
    }

    #[tokio::test]
    async fn no_providers_means_not_sent() {
        assert!(!dispatcher(Vec::new()).send(&contact(), recipients()).await);
    }

    struct SlowProvider;

    #[async_trait]
    impl EmailProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn send(&self, _message: &EmailMessage) -> Result<(), EmailProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;

            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_provider_falls_through() {
        let dispatcher = NotificationDispatcher::new(
            vec![Arc::new(SlowProvider), Arc::new(provider_ok("brevo", 1))],
            Arc::new(MockUsersRepository::new()),
            Duration::from_millis(50),
        );

        assert!(dispatcher.send(&contact(), recipients()).await);
    }

    #[tokio::test]
    async fn render_failure_sends_nothing() {
        let dispatcher = dispatcher(vec![provider_ok("resend", 0)]);
        let notification = Notification::OrderConfirmation(OrderSummary {
            order_id: "0191c2d4".to_string(),
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            amount: 100,
            items: Vec::<LineItem>::new(),
            address: DeliveryAddress {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+2348000000000".to_string(),
                street: "12 Allen Avenue".to_string(),
                city: "Ikeja".to_string(),
                state: "Lagos".to_string(),
                lga: "Ikeja".to_string(),
            },
        });

        assert!(!dispatcher.send(&notification, recipients()).await);
    }

    #[tokio::test]
    async fn empty_recipient_list_sends_nothing() {
        let dispatcher = dispatcher(vec![provider_ok("resend", 0)]);

        assert!(!dispatcher.send(&contact(), Vec::new()).await);
    }

    #[tokio::test]
    async fn admins_are_loaded_as_recipients() {
        let mut users = MockUsersRepository::new();
        users.expect_list_admins().times(1).returning(|| {
            Ok(vec![User {
                uuid: uuid::Uuid::now_v7(),
                name: "Admin".to_string(),
                email: "admin@mealbox.example".to_string(),
                role: Role::Admin,
                created_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let mut provider = MockEmailProvider::new();
        provider.expect_name().return_const("resend");
        provider
            .expect_send()
            .withf(|message| message.to == ["admin@mealbox.example"])
            .times(1)
            .returning(|_| Ok(()));

        let dispatcher = NotificationDispatcher::new(
            vec![Arc::new(provider)],
            Arc::new(users),
            Duration::from_secs(1),
        );

        assert!(dispatcher.send_to_admins(&contact()).await);
    }

    #[tokio::test]
    async fn admin_lookup_failure_is_not_sent() {
        let mut users = MockUsersRepository::new();
        users
            .expect_list_admins()
            .returning(|| Err(sqlx::Error::PoolTimedOut));

        let dispatcher = NotificationDispatcher::new(
            vec![Arc::new(provider_ok("resend", 0))],
            Arc::new(users),
            Duration::from_secs(1),
        );

        assert!(!dispatcher.send_to_admins(&contact()).await);
    }
}
