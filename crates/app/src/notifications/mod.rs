//! Email notifications
//!
//! Rendering lives in the core crate; this module delivers rendered messages
//! through an ordered chain of providers, falling through on failure.

mod brevo;
mod dispatcher;
mod provider;
mod resend;

pub use brevo::BrevoProvider;
pub use dispatcher::*;
pub use provider::*;
pub use resend::ResendProvider;
