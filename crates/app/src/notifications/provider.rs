//! Email provider capability.

use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use async_trait::async_trait;
use mealbox::notifications::EmailMessage;
use mockall::automock;
use thiserror::Error;
use tracing::warn;

use crate::notifications::{BrevoProvider, ResendProvider};

/// Errors that can occur when handing a message to a provider.
#[derive(Debug, Error)]
pub enum EmailProviderError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Something that can deliver a rendered email.
#[automock]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Deliver `message`.
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailProviderError>;
}

/// Known provider implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Resend,
    Brevo,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resend => "resend",
            Self::Brevo => "brevo",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown email provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resend" => Ok(Self::Resend),
            "brevo" => Ok(Self::Brevo),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Sender identity and credentials for building the provider chain.
#[derive(Clone)]
pub struct EmailConfig {
    /// Sender display name.
    pub from_name: String,

    /// Sender address.
    pub from_address: String,

    /// Resend API key; the provider is skipped without one.
    pub resend_api_key: Option<String>,

    /// Brevo API key; the provider is skipped without one.
    pub brevo_api_key: Option<String>,

    /// Upper bound for one provider attempt.
    pub timeout: Duration,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("from_name", &self.from_name)
            .field("from_address", &self.from_address)
            .field("resend_api_key", &self.resend_api_key.as_ref().map(|_| "***"))
            .field("brevo_api_key", &self.brevo_api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build providers in `order`, skipping any without credentials.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be constructed.
pub fn build_providers(
    order: &[ProviderKind],
    config: &EmailConfig,
) -> Result<Vec<Arc<dyn EmailProvider>>, reqwest::Error> {
    let mut providers: Vec<Arc<dyn EmailProvider>> = Vec::with_capacity(order.len());

    for kind in order {
        match kind {
            ProviderKind::Resend => match &config.resend_api_key {
                Some(key) => providers.push(Arc::new(ResendProvider::new(config, key.clone())?)),
                None => warn!(provider = %kind, "no API key configured, skipping provider"),
            },
            ProviderKind::Brevo => match &config.brevo_api_key {
                Some(key) => providers.push(Arc::new(BrevoProvider::new(config, key.clone())?)),
                None => warn!(provider = %kind, "no API key configured, skipping provider"),
            },
        }
    }

    if providers.is_empty() {
        warn!("no email providers configured, notifications will not be delivered");
    }

    Ok(providers)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            from_name: "Mealbox".to_string(),
            from_address: "orders@mealbox.example".to_string(),
            resend_api_key: None,
            brevo_api_key: Some("brevo-key".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn parses_provider_names() -> TestResult {
        assert_eq!(" Resend ".parse::<ProviderKind>()?, ProviderKind::Resend);
        assert_eq!("brevo".parse::<ProviderKind>()?, ProviderKind::Brevo);
        assert!("mailgun".parse::<ProviderKind>().is_err());

        Ok(())
    }

    #[test]
    fn providers_without_keys_are_skipped() -> TestResult {
        let providers = build_providers(&[ProviderKind::Resend, ProviderKind::Brevo], &config())?;

        let names: Vec<&str> = providers.iter().map(|provider| provider.name()).collect();

        assert_eq!(names, ["brevo"]);

        Ok(())
    }

    #[test]
    fn order_is_preserved() -> TestResult {
        let config = EmailConfig {
            resend_api_key: Some("resend-key".to_string()),
            ..config()
        };

        let providers = build_providers(&[ProviderKind::Brevo, ProviderKind::Resend], &config)?;

        let names: Vec<&str> = providers.iter().map(|provider| provider.name()).collect();

        assert_eq!(names, ["brevo", "resend"]);

        Ok(())
    }

    #[test]
    fn debug_hides_keys() {
        let rendered = format!("{:?}", config());

        assert!(!rendered.contains("brevo-key"));
    }
}
