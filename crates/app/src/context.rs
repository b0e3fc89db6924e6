//! App Context

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        business_rules::{BusinessRulesService, DefaultBusinessRulesService, PgBusinessRulesRepository},
        carts::{CartsService, DefaultCartsService, PgCartsRepository},
        checkout::{CheckoutService, DefaultCheckoutService, PgCheckoutsRepository},
        delivery_costs::{DefaultDeliveryCostsService, DeliveryCostsService, PgDeliveryCostsRepository},
        orders::{DefaultOrdersService, OrdersService, PgOrdersRepository},
        recipes::PgRecipesRepository,
        users::{DefaultUsersService, PgUsersRepository, UsersService},
    },
    notifications::{EmailConfig, NotificationDispatcher, Notifier, ProviderKind, build_providers},
    payments::PaystackGateway,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Payment gateway settings.
#[derive(Clone)]
pub struct PaymentsConfig {
    pub base_url: String,
    pub secret_key: String,
    pub timeout: Duration,
    pub callback_url: Option<String>,
}

impl fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"***")
            .field("timeout", &self.timeout)
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Everything needed to wire the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,

    /// Public storefront URL, used for order tracking links.
    pub site_url: String,

    pub email: EmailConfig,

    /// Providers to try, in order.
    pub email_providers: Vec<ProviderKind>,

    pub payments: PaymentsConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub business_rules: Arc<dyn BusinessRulesService>,
    pub delivery_costs: Arc<dyn DeliveryCostsService>,
    pub orders: Arc<dyn OrdersService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub users: Arc<dyn UsersService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or building an
    /// HTTP client fails.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        Self::from_config_with(config, |notifier| notifier).await
    }

    /// As [`AppContext::from_config`], letting the caller wrap the notifier
    /// (for example to record delivery outcomes) before services receive it.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or building an
    /// HTTP client fails.
    pub async fn from_config_with<F>(config: &AppConfig, wrap_notifier: F) -> Result<Self, AppInitError>
    where
        F: FnOnce(Arc<dyn Notifier>) -> Arc<dyn Notifier>,
    {
        let pool = database::connect(&config.database_url, config.database_max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let users = Arc::new(PgUsersRepository::new(db.clone()));
        let recipes = Arc::new(PgRecipesRepository::new(db.clone()));
        let costs = Arc::new(PgDeliveryCostsRepository::new(db.clone()));

        let providers = build_providers(&config.email_providers, &config.email)
            .map_err(AppInitError::HttpClient)?;
        let dispatcher: Arc<dyn Notifier> = Arc::new(NotificationDispatcher::new(
            providers,
            users.clone(),
            config.email.timeout,
        ));
        let notifier = wrap_notifier(dispatcher);

        let gateway = Arc::new(
            PaystackGateway::new(
                &config.payments.base_url,
                &config.payments.secret_key,
                config.payments.timeout,
            )
            .map_err(AppInitError::HttpClient)?,
        );

        let business_rules: Arc<dyn BusinessRulesService> = Arc::new(
            DefaultBusinessRulesService::new(Arc::new(PgBusinessRulesRepository::new(db.clone())), costs.clone()),
        );
        let orders: Arc<dyn OrdersService> = Arc::new(DefaultOrdersService::new(
            Arc::new(PgOrdersRepository::new(db.clone())),
            users.clone(),
            notifier.clone(),
            &config.site_url,
        ));
        let carts: Arc<dyn CartsService> = Arc::new(DefaultCartsService::new(
            Arc::new(PgCartsRepository::new(db.clone())),
            recipes.clone(),
        ));

        Ok(Self {
            delivery_costs: Arc::new(DefaultDeliveryCostsService::new(costs)),
            checkout: Arc::new(DefaultCheckoutService::new(
                Arc::new(PgCheckoutsRepository::new(db)),
                recipes,
                business_rules.clone(),
                orders.clone(),
                carts.clone(),
                gateway,
                config.payments.callback_url.clone(),
            )),
            business_rules,
            orders,
            carts,
            users: Arc::new(DefaultUsersService::new(users)),
            notifier,
        })
    }
}
