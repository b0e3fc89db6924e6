//! Logging, metrics and request tracing middleware.

use thiserror::Error;

mod logging;
mod metrics;
mod notifier;
mod request;
mod settings;

pub(crate) use logging::init;
pub(crate) use metrics::{metrics_handler, observe_status_transition};
pub(crate) use notifier::MeteredNotifier;
pub(crate) use request::request_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
