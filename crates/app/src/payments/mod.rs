//! Payment gateway
//!
//! The gateway is a black box: the store starts a hosted payment and later asks
//! whether it succeeded and for how much.

mod paystack;

use std::num::TryFromIntError;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

pub use paystack::{PAYSTACK_BASE_URL, PaystackGateway};

/// Status the gateway reports for a completed charge.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Error)]
pub enum PaymentError {
    /// An HTTP transport or decoding error occurred, including timeouts.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("payment gateway returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The gateway answered but refused the request.
    #[error("payment gateway declined the request: {0}")]
    Declined(String),

    /// A reported amount does not fit the store's amount type.
    #[error("payment gateway reported an invalid amount")]
    InvalidAmount(#[from] TryFromIntError),
}

/// A payment to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInit {
    /// Payer email.
    pub email: String,

    /// Amount in minor units.
    pub amount: u64,

    /// Store-generated reference, unique per attempt.
    pub reference: String,

    /// Where the gateway sends the payer afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// A started payment the payer must complete on the gateway's page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    pub reference: String,
    pub authorization_url: String,
    pub access_code: String,
}

/// What the gateway says happened to a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    pub reference: String,
    pub status: String,
    pub amount: u64,
}

impl VerifiedPayment {
    /// Whether the charge went through.
    pub fn is_successful(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a hosted payment.
    async fn initialize(&self, payment: PaymentInit) -> Result<PaymentSession, PaymentError>;

    /// Look up the outcome of the payment with `reference`.
    async fn verify(&self, reference: &str) -> Result<VerifiedPayment, PaymentError>;
}
