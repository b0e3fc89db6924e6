//! Notifier wrapper that counts send outcomes.

use std::sync::Arc;

use async_trait::async_trait;

use mealbox::notifications::Notification;
use mealbox_app::notifications::Notifier;

use super::metrics::observe_notification;

/// Records every send in `mealbox_json_notifications_total` before returning its outcome.
pub(crate) struct MeteredNotifier {
    inner: Arc<dyn Notifier>,
}

impl MeteredNotifier {
    pub(crate) fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Notifier for MeteredNotifier {
    async fn send(&self, notification: &Notification, recipients: Vec<String>) -> bool {
        let sent = self.inner.send(notification, recipients).await;

        observe_notification(notification.kind(), sent);

        sent
    }

    async fn send_to_admins(&self, notification: &Notification) -> bool {
        let sent = self.inner.send_to_admins(notification).await;

        observe_notification(notification.kind(), sent);

        sent
    }
}

#[cfg(test)]
mod tests {
    use mealbox::notifications::ContactMessage;
    use mealbox_app::notifications::MockNotifier;

    use super::*;

    fn contact() -> Notification {
        Notification::ContactForm(ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Do you deliver to Epe?".to_string(),
        })
    }

    #[tokio::test]
    async fn passes_outcomes_through() {
        let mut inner = MockNotifier::new();

        inner
            .expect_send()
            .once()
            .withf(|_, recipients| *recipients == ["ada@example.com".to_string()])
            .return_once(|_, _| true);
        inner.expect_send_to_admins().once().return_once(|_| false);

        let notifier = MeteredNotifier::new(Arc::new(inner));

        assert!(
            notifier
                .send(&contact(), vec!["ada@example.com".to_string()])
                .await
        );
        assert!(!notifier.send_to_admins(&contact()).await);
    }
}
