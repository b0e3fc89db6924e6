//! Business rules service.

use std::sync::Arc;

use async_trait::async_trait;
use mealbox::{
    delivery::Destination,
    rules::{BusinessRules, BusinessRulesUpdate, OrderTotal},
};
use mockall::automock;
use tracing::{debug, warn};

use crate::domain::{
    business_rules::{BusinessRulesRepository, errors::BusinessRulesServiceError},
    delivery_costs::DeliveryCostsRepository,
};

/// Compare-and-swap attempts before an update gives up with a conflict.
const MAX_UPDATE_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct DefaultBusinessRulesService {
    rules: Arc<dyn BusinessRulesRepository>,
    costs: Arc<dyn DeliveryCostsRepository>,
}

impl DefaultBusinessRulesService {
    #[must_use]
    pub fn new(
        rules: Arc<dyn BusinessRulesRepository>,
        costs: Arc<dyn DeliveryCostsRepository>,
    ) -> Self {
        Self { rules, costs }
    }
}

#[async_trait]
impl BusinessRulesService for DefaultBusinessRulesService {
    async fn get_rules(&self) -> Result<BusinessRules, BusinessRulesServiceError> {
        Ok(self.rules.get_or_create_default().await?.rules)
    }

    async fn update_rules(
        &self,
        update: BusinessRulesUpdate,
    ) -> Result<BusinessRules, BusinessRulesServiceError> {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let current = self.rules.get_or_create_default().await?;
            let next = current.rules.apply(&update)?;

            if let Some(stored) = self.rules.replace(&next, current.version).await? {
                debug!(version = stored.version, "business rules updated");

                return Ok(stored.rules);
            }

            warn!(
                attempt,
                expected_version = current.version,
                "business rules version conflict"
            );
        }

        Err(BusinessRulesServiceError::Conflict)
    }

    async fn compute_order_total(
        &self,
        subtotal: u64,
        destination: Option<Destination>,
    ) -> Result<OrderTotal, BusinessRulesServiceError> {
        let rules = self.get_rules().await?;

        let location_fee = match destination {
            Some(destination) => {
                self.costs
                    .get_cost(&destination.state, &destination.lga)
                    .await?
            }
            None => None,
        };

        Ok(rules.order_total(subtotal, location_fee))
    }
}

#[automock]
#[async_trait]
pub trait BusinessRulesService: Send + Sync {
    /// Current rules, created with defaults on first read.
    async fn get_rules(&self) -> Result<BusinessRules, BusinessRulesServiceError>;

    /// Validate and merge `update`, then persist the whole record.
    ///
    /// Nothing is written when any field is invalid.
    async fn update_rules(
        &self,
        update: BusinessRulesUpdate,
    ) -> Result<BusinessRules, BusinessRulesServiceError>;

    /// Checkout total for `subtotal`, using the location override for `destination` when one exists.
    async fn compute_order_total(
        &self,
        subtotal: u64,
        destination: Option<Destination>,
    ) -> Result<OrderTotal, BusinessRulesServiceError>;
}

#[cfg(test)]
mod tests {
    use mealbox::{locations::LocationCost, rules::FeeSource, validation::ValidationError};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::business_rules::{MockBusinessRulesRepository, models::StoredBusinessRules},
        test::memory::{MemoryBusinessRulesRepository, MemoryDeliveryCostsRepository},
    };

    use super::*;

    fn service() -> (
        DefaultBusinessRulesService,
        Arc<MemoryBusinessRulesRepository>,
        Arc<MemoryDeliveryCostsRepository>,
    ) {
        let rules = Arc::new(MemoryBusinessRulesRepository::default());
        let costs = Arc::new(MemoryDeliveryCostsRepository::default());

        (
            DefaultBusinessRulesService::new(rules.clone(), costs.clone()),
            rules,
            costs,
        )
    }

    fn seeded_update() -> BusinessRulesUpdate {
        BusinessRulesUpdate {
            delivery_fee: Some(500),
            tax_rate: Some(Decimal::new(75, 1)),
            tax_enabled: Some(true),
        }
    }

    #[tokio::test]
    async fn first_read_returns_defaults() -> TestResult {
        let (service, _, _) = service();

        let rules = service.get_rules().await?;

        assert_eq!(rules, BusinessRules::default());

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_first_reads_create_one_record() -> TestResult {
        let (service, repository, _) = service();

        let reads = (0..16).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.get_rules().await })
        });

        for read in reads.collect::<Vec<_>>() {
            assert_eq!(read.await??, BusinessRules::default());
        }

        assert_eq!(repository.creations().await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_persists() -> TestResult {
        let (service, _, _) = service();

        service.update_rules(seeded_update()).await?;
        let updated = service
            .update_rules(BusinessRulesUpdate {
                tax_enabled: Some(false),
                ..BusinessRulesUpdate::default()
            })
            .await?;

        assert_eq!(updated.delivery_fee, 500);
        assert_eq!(updated.tax_rate, Decimal::new(75, 1));
        assert!(!updated.tax_enabled);
        assert_eq!(service.get_rules().await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_tax_rate_leaves_record_unchanged() -> TestResult {
        let (service, _, _) = service();
        let before = service.update_rules(seeded_update()).await?;

        let result = service
            .update_rules(BusinessRulesUpdate {
                delivery_fee: Some(1_000),
                tax_rate: Some(Decimal::new(150, 0)),
                tax_enabled: None,
            })
            .await;

        assert!(
            matches!(
                result,
                Err(BusinessRulesServiceError::Validation(
                    ValidationError::OutOfRange {
                        field: "taxRate",
                        ..
                    }
                ))
            ),
            "expected taxRate validation error, got {result:?}"
        );
        assert_eq!(service.get_rules().await?, before);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_update_never_writes() {
        let mut repository = MockBusinessRulesRepository::new();
        repository.expect_get_or_create_default().returning(|| {
            Ok(StoredBusinessRules {
                rules: BusinessRules::default(),
                version: 0,
                updated_at: jiff::Timestamp::UNIX_EPOCH,
            })
        });
        repository.expect_replace().never();

        let service = DefaultBusinessRulesService::new(
            Arc::new(repository),
            Arc::new(MemoryDeliveryCostsRepository::default()),
        );

        let result = service
            .update_rules(BusinessRulesUpdate {
                delivery_fee: Some(-1),
                ..BusinessRulesUpdate::default()
            })
            .await;

        assert!(
            matches!(result, Err(BusinessRulesServiceError::Validation(_))),
            "expected validation error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn persistent_version_conflict_gives_up() {
        let mut repository = MockBusinessRulesRepository::new();
        repository.expect_get_or_create_default().returning(|| {
            Ok(StoredBusinessRules {
                rules: BusinessRules::default(),
                version: 7,
                updated_at: jiff::Timestamp::UNIX_EPOCH,
            })
        });
        repository
            .expect_replace()
            .times(MAX_UPDATE_ATTEMPTS)
            .returning(|_, _| Ok(None));

        let service = DefaultBusinessRulesService::new(
            Arc::new(repository),
            Arc::new(MemoryDeliveryCostsRepository::default()),
        );

        let result = service.update_rules(seeded_update()).await;

        assert!(
            matches!(result, Err(BusinessRulesServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );
    }

    #[tokio::test]
    async fn concurrent_updates_all_land() -> TestResult {
        let (service, _, _) = service();

        let first = service.clone();
        let second = service.clone();

        let (fee, tax) = tokio::join!(
            first.update_rules(BusinessRulesUpdate {
                delivery_fee: Some(800),
                ..BusinessRulesUpdate::default()
            }),
            second.update_rules(BusinessRulesUpdate {
                tax_enabled: Some(true),
                ..BusinessRulesUpdate::default()
            }),
        );
        fee?;
        tax?;

        let rules = service.get_rules().await?;

        assert_eq!(rules.delivery_fee, 800);
        assert!(rules.tax_enabled);

        Ok(())
    }

    #[tokio::test]
    async fn compute_total_prefers_location_override() -> TestResult {
        let (service, _, costs) = service();
        service.update_rules(seeded_update()).await?;
        costs
            .upsert_cost(&LocationCost::new("Lagos", "Ikeja", 300)?)
            .await?;

        let ikeja = service
            .compute_order_total(5_000, Some(Destination::new("Lagos", "Ikeja")))
            .await?;
        let unlisted = service
            .compute_order_total(5_000, Some(Destination::new("Lagos", "Epe")))
            .await?;

        assert_eq!(
            (ikeja.delivery_fee, ikeja.tax, ikeja.total),
            (300, 375, 5_675)
        );
        assert_eq!(ikeja.fee_source, FeeSource::Location);
        assert_eq!(
            (unlisted.delivery_fee, unlisted.tax, unlisted.total),
            (500, 375, 5_875)
        );

        Ok(())
    }

    #[tokio::test]
    async fn compute_total_without_destination_uses_flat_fee() -> TestResult {
        let (service, _, costs) = service();
        service.update_rules(seeded_update()).await?;
        costs
            .upsert_cost(&LocationCost::new("Lagos", "Ikeja", 300)?)
            .await?;

        let total = service.compute_order_total(5_000, None).await?;

        assert_eq!(total.delivery_fee, 500);
        assert_eq!(total.fee_source, FeeSource::Flat);

        Ok(())
    }
}
