//! Server configuration module

use clap::Parser;

use mealbox_app::context::AppConfig;

use crate::config::{
    db::DatabaseConfig, email::EmailSettings, observability::LoggingConfig,
    payments::PaymentSettings, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod email;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

/// Mealbox JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "mealbox-json", about = "Mealbox JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Outbound email settings.
    #[command(flatten)]
    pub email: EmailSettings,

    /// Payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring the application services.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            database_max_connections: self.database.database_max_connections,
            site_url: self.email.site_url.clone(),
            email: self.email.email_config(),
            email_providers: self.email.email_provider_order.clone(),
            payments: self.payments.payments_config(),
        }
    }
}
