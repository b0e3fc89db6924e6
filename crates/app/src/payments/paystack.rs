//! Paystack client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};

use crate::payments::{PaymentError, PaymentGateway, PaymentInit, PaymentSession, VerifiedPayment};

pub const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

#[derive(Debug, Clone)]
pub struct PaystackGateway {
    http: Client,
    base_url: String,
    secret_key: String,
}

impl PaystackGateway {
    /// Create a client. Every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    reference: String,
    status: String,
    amount: i64,
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, PaymentError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        return Err(PaymentError::Rejected { status, body });
    }

    let envelope = response.json::<Envelope<T>>().await?;

    match envelope {
        Envelope {
            status: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { message, .. } => Err(PaymentError::Declined(message)),
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(&self, payment: PaymentInit) -> Result<PaymentSession, PaymentError> {
        let response = self
            .http
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&payment)
            .send()
            .await?;

        let data: InitializeData = read_envelope(response).await?;

        Ok(PaymentSession {
            reference: data.reference,
            authorization_url: data.authorization_url,
            access_code: data.access_code,
        })
    }

    async fn verify(&self, reference: &str) -> Result<VerifiedPayment, PaymentError> {
        let response = self
            .http
            .get(format!("{}/transaction/verify/{reference}", self.base_url))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let data: VerifyData = read_envelope(response).await?;

        Ok(VerifiedPayment {
            reference: data.reference,
            status: data.status,
            amount: u64::try_from(data.amount)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() -> TestResult {
        let gateway = PaystackGateway::new("https://api.paystack.co/", "sk", Duration::from_secs(5))?;

        assert_eq!(gateway.base_url, PAYSTACK_BASE_URL);

        Ok(())
    }

    #[test]
    fn init_body_uses_gateway_field_names() -> TestResult {
        let json = serde_json::to_value(PaymentInit {
            email: "ada@example.com".to_string(),
            amount: 567_500,
            reference: "mbx-1".to_string(),
            callback_url: None,
        })?;

        assert_eq!(json["amount"], 567_500);
        assert_eq!(json["reference"], "mbx-1");
        assert!(json.get("callback_url").is_none());

        Ok(())
    }

    #[test]
    fn verify_envelope_decodes() -> TestResult {
        let envelope: Envelope<VerifyData> = serde_json::from_str(
            r#"{"status":true,"message":"Verification successful",
                "data":{"reference":"mbx-1","status":"success","amount":567500,"currency":"NGN"}}"#,
        )?;

        let Some(data) = envelope.data else {
            panic!("expected data");
        };

        assert_eq!(data.amount, 567_500);
        assert_eq!(data.status, "success");

        Ok(())
    }

    #[test]
    fn success_status_is_recognised() {
        let payment = VerifiedPayment {
            reference: "mbx-1".to_string(),
            status: "abandoned".to_string(),
            amount: 1,
        };

        assert!(!payment.is_successful());
        assert!(
            VerifiedPayment {
                status: "success".to_string(),
                ..payment
            }
            .is_successful()
        );
    }
}
