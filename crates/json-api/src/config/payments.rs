//! Payments Config

use std::time::Duration;

use clap::Args;

use mealbox_app::{context::PaymentsConfig, payments::PAYSTACK_BASE_URL};

/// Payment gateway settings.
#[derive(Debug, Args)]
pub struct PaymentSettings {
    /// Paystack secret key
    #[arg(long, env = "PAYSTACK_SECRET_KEY", hide_env_values = true)]
    pub paystack_secret_key: String,

    /// Paystack API base URL
    #[arg(long, env = "PAYSTACK_BASE_URL", default_value = PAYSTACK_BASE_URL)]
    pub paystack_base_url: String,

    /// Payment gateway request timeout in milliseconds
    #[arg(long, env = "PAYMENT_TIMEOUT_MS", default_value_t = 15_000_u64)]
    pub payment_timeout_ms: u64,

    /// Where the gateway sends the customer after paying
    #[arg(long, env = "PAYMENT_CALLBACK_URL")]
    pub payment_callback_url: Option<String>,
}

impl PaymentSettings {
    pub(crate) fn payments_config(&self) -> PaymentsConfig {
        PaymentsConfig {
            base_url: self.paystack_base_url.clone(),
            secret_key: self.paystack_secret_key.clone(),
            timeout: Duration::from_millis(self.payment_timeout_ms),
            callback_url: self.payment_callback_url.clone(),
        }
    }
}
