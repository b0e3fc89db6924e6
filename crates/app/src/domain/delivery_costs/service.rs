//! Delivery costs service.

use std::sync::Arc;

use async_trait::async_trait;
use mealbox::{locations::LocationCost, validation::require_text};
use mockall::automock;
use tracing::info;

use crate::domain::delivery_costs::{DeliveryCostsRepository, errors::DeliveryCostsServiceError};

#[derive(Clone)]
pub struct DefaultDeliveryCostsService {
    repository: Arc<dyn DeliveryCostsRepository>,
}

impl DefaultDeliveryCostsService {
    #[must_use]
    pub fn new(repository: Arc<dyn DeliveryCostsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl DeliveryCostsService for DefaultDeliveryCostsService {
    async fn get_cost(
        &self,
        state: &str,
        lga: &str,
    ) -> Result<Option<u64>, DeliveryCostsServiceError> {
        Ok(self.repository.get_cost(state, lga).await?)
    }

    async fn list_states(&self) -> Result<Vec<String>, DeliveryCostsServiceError> {
        Ok(self.repository.list_states().await?)
    }

    async fn list_lgas(&self, state: &str) -> Result<Vec<String>, DeliveryCostsServiceError> {
        Ok(self.repository.list_lgas(state).await?)
    }

    async fn all_locations(&self) -> Result<Vec<LocationCost>, DeliveryCostsServiceError> {
        Ok(self.repository.list_locations().await?)
    }

    async fn add_location(
        &self,
        state: &str,
        lga: &str,
        cost: i64,
    ) -> Result<LocationCost, DeliveryCostsServiceError> {
        let location = LocationCost::new(state, lga, cost)?;

        let created = self.repository.upsert_cost(&location).await?;

        info!(
            state = %location.state,
            lga = %location.lga,
            cost = location.cost,
            created,
            "delivery cost saved"
        );

        Ok(location)
    }

    async fn update_location(
        &self,
        state: &str,
        lga: &str,
        cost: i64,
    ) -> Result<LocationCost, DeliveryCostsServiceError> {
        let location = LocationCost::new(state, lga, cost)?;

        if !self.repository.update_cost(&location).await? {
            return Err(DeliveryCostsServiceError::NotFound);
        }

        info!(
            state = %location.state,
            lga = %location.lga,
            cost = location.cost,
            "delivery cost updated"
        );

        Ok(location)
    }

    async fn remove_location(&self, state: &str, lga: &str) -> Result<(), DeliveryCostsServiceError> {
        require_text("state", state)?;
        require_text("lga", lga)?;

        if !self.repository.remove_cost(state, lga).await? {
            return Err(DeliveryCostsServiceError::NotFound);
        }

        info!(state, lga, "delivery cost removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait DeliveryCostsService: Send + Sync {
    /// Override for `(state, lga)`; `None` means no override, not zero.
    async fn get_cost(&self, state: &str, lga: &str)
    -> Result<Option<u64>, DeliveryCostsServiceError>;

    /// States with at least one LGA, sorted.
    async fn list_states(&self) -> Result<Vec<String>, DeliveryCostsServiceError>;

    /// LGAs under `state`, sorted; empty when the state is absent.
    async fn list_lgas(&self, state: &str) -> Result<Vec<String>, DeliveryCostsServiceError>;

    /// Every location ordered by `(state, lga)`.
    async fn all_locations(&self) -> Result<Vec<LocationCost>, DeliveryCostsServiceError>;

    /// Create or replace the cost of one location.
    async fn add_location(
        &self,
        state: &str,
        lga: &str,
        cost: i64,
    ) -> Result<LocationCost, DeliveryCostsServiceError>;

    /// Change the cost of an existing location.
    async fn update_location(
        &self,
        state: &str,
        lga: &str,
        cost: i64,
    ) -> Result<LocationCost, DeliveryCostsServiceError>;

    /// Delete one location. The state disappears with its last LGA.
    async fn remove_location(&self, state: &str, lga: &str) -> Result<(), DeliveryCostsServiceError>;
}
