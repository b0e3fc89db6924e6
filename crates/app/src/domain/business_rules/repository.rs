//! Business Rules Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mealbox::rules::BusinessRules;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::{amount_param, business_rules::models::StoredBusinessRules, try_get_amount},
};

const CREATE_DEFAULT_SQL: &str = include_str!("sql/create_default.sql");
const GET_RULES_SQL: &str = include_str!("sql/get_rules.sql");
const REPLACE_RULES_SQL: &str = include_str!("sql/replace_rules.sql");

#[automock]
#[async_trait]
pub trait BusinessRulesRepository: Send + Sync {
    /// Read the singleton, creating it with defaults if it does not exist yet.
    async fn get_or_create_default(&self) -> Result<StoredBusinessRules, sqlx::Error>;

    /// Overwrite the singleton if its version still equals `expected_version`.
    ///
    /// Returns `None` when another writer got there first.
    async fn replace(
        &self,
        rules: &BusinessRules,
        expected_version: i64,
    ) -> Result<Option<StoredBusinessRules>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgBusinessRulesRepository {
    db: Db,
}

impl PgBusinessRulesRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BusinessRulesRepository for PgBusinessRulesRepository {
    async fn get_or_create_default(&self) -> Result<StoredBusinessRules, sqlx::Error> {
        query(CREATE_DEFAULT_SQL).execute(self.db.pool()).await?;

        query_as::<Postgres, StoredBusinessRules>(GET_RULES_SQL)
            .fetch_one(self.db.pool())
            .await
    }

    async fn replace(
        &self,
        rules: &BusinessRules,
        expected_version: i64,
    ) -> Result<Option<StoredBusinessRules>, sqlx::Error> {
        query_as::<Postgres, StoredBusinessRules>(REPLACE_RULES_SQL)
            .bind(amount_param(rules.delivery_fee)?)
            .bind(rules.tax_rate)
            .bind(rules.tax_enabled)
            .bind(expected_version)
            .fetch_optional(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoredBusinessRules {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            rules: BusinessRules {
                delivery_fee: try_get_amount(row, "delivery_fee")?,
                tax_rate: row.try_get("tax_rate")?,
                tax_enabled: row.try_get("tax_enabled")?,
            },
            version: row.try_get("version")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::test::db::TestDb;

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn concurrent_first_reads_share_one_row() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgBusinessRulesRepository::new(Db::new(db.pool().clone()));

        let reads = (0..8).map(|_| {
            let repository = repository.clone();
            tokio::spawn(async move { repository.get_or_create_default().await })
        });

        for read in reads.collect::<Vec<_>>() {
            let stored = read.await??;

            assert_eq!(stored.rules, BusinessRules::default());
            assert_eq!(stored.version, 0);
        }

        let rows: i64 = sqlx::query_scalar("SELECT count(*) FROM business_rules")
            .fetch_one(db.pool())
            .await?;

        assert_eq!(rows, 1);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn replace_requires_current_version() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgBusinessRulesRepository::new(Db::new(db.pool().clone()));
        let current = repository.get_or_create_default().await?;
        let rules = BusinessRules {
            delivery_fee: 500,
            tax_rate: Decimal::new(75, 1),
            tax_enabled: true,
        };

        let replaced = repository.replace(&rules, current.version).await?;
        let stale = repository.replace(&rules, current.version).await?;

        assert_eq!(replaced.map(|stored| stored.rules), Some(rules));
        assert_eq!(stale, None);

        Ok(())
    }
}
