//! Brevo email provider.

use async_trait::async_trait;
use mealbox::notifications::EmailMessage;
use reqwest::Client;
use serde::Serialize;

use crate::notifications::{EmailConfig, EmailProvider, EmailProviderError};

const BREVO_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Clone)]
pub struct BrevoProvider {
    http: Client,
    api_key: String,
    sender_name: String,
    sender_email: String,
    url: String,
}

impl BrevoProvider {
    /// Create a provider sending as `config.from_address`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &EmailConfig, api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(config.timeout).build()?,
            api_key,
            sender_name: config.from_name.clone(),
            sender_email: config.from_address.clone(),
            url: BREVO_URL.to_string(),
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
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

impl<'a> SendEmailRequest<'a> {
    fn new(provider: &'a BrevoProvider, message: &'a EmailMessage) -> Self {
        Self {
            sender: Contact {
                name: Some(&provider.sender_name),
                email: &provider.sender_email,
            },
            to: message
                .to
                .iter()
                .map(|email| Contact { name: None, email })
                .collect(),
            subject: &message.subject,
            html_content: &message.html,
        }
    }
}

#[async_trait]
impl EmailProvider for BrevoProvider {
    fn name(&self) -> &'static str {
        "brevo"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), EmailProviderError> {
        let body = SendEmailRequest::new(self, message);

        let response = self
            .http
            .post(&self.url)
            .header("api-key", &self.api_key)
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
