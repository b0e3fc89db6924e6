//! Resend email provider.

use async_trait::async_trait;
use mealbox::notifications::EmailMessage;
use reqwest::Client;
use serde::Serialize;

use crate::notifications::{EmailConfig, EmailProvider, EmailProviderError};

const RESEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct ResendProvider {
    http: Client,
    api_key: String,
    from: String,
    url: String,
}

impl ResendProvider {
    /// Create a provider sending as `config.from_name <config.from_address>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &EmailConfig, api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(config.timeout).build()?,
            api_key,
            from: format!("{} <{}>", config.from_name, config.from_address),
            url: RESEND_URL.to_string(),
        })
    }

    /// Send to `url` instead of the public API.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), EmailProviderError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(EmailProviderError::Rejected { status, body });
        }

        Ok(())
    }
}
