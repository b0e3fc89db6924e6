//! Email Config

use std::time::Duration;

use clap::Args;

use mealbox_app::notifications::{EmailConfig, ProviderKind};

/// Outbound email settings.
#[derive(Debug, Args)]
pub struct EmailSettings {
    /// Display name used as the sender
    #[arg(long, env = "EMAIL_FROM_NAME", default_value = "Mealbox")]
    pub email_from_name: String,

    /// Sender address
    #[arg(long, env = "EMAIL_FROM", default_value = "orders@mealbox.example")]
    pub email_from: String,

    /// Resend API key
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Brevo API key
    #[arg(long, env = "BREVO_API_KEY", hide_env_values = true)]
    pub brevo_api_key: Option<String>,

    /// Providers to try, in order (resend, brevo)
    #[arg(
        long,
        env = "EMAIL_PROVIDER_ORDER",
        value_delimiter = ',',
        default_value = "resend,brevo"
    )]
    pub email_provider_order: Vec<ProviderKind>,

    /// Per-provider send timeout in milliseconds
    #[arg(long, env = "EMAIL_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub email_timeout_ms: u64,

    /// Public storefront URL, used in order tracking links
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,
}

impl EmailSettings {
    pub(crate) fn email_config(&self) -> EmailConfig {
        EmailConfig {
            from_name: self.email_from_name.clone(),
            from_address: self.email_from.clone(),
            resend_api_key: self.resend_api_key.clone(),
            brevo_api_key: self.brevo_api_key.clone(),
            timeout: Duration::from_millis(self.email_timeout_ms),
        }
    }
}
