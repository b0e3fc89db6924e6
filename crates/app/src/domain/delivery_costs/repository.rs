//! Delivery Costs Repository

use async_trait::async_trait;
use mealbox::locations::LocationCost;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::Db,
    domain::{amount_param, try_get_amount},
};

const GET_COST_SQL: &str = include_str!("sql/get_cost.sql");
const LIST_LOCATIONS_SQL: &str = include_str!("sql/list_locations.sql");
const LIST_STATES_SQL: &str = include_str!("sql/list_states.sql");
const LIST_LGAS_SQL: &str = include_str!("sql/list_lgas.sql");
const UPSERT_COST_SQL: &str = include_str!("sql/upsert_cost.sql");
const UPDATE_COST_SQL: &str = include_str!("sql/update_cost.sql");
const REMOVE_COST_SQL: &str = include_str!("sql/remove_cost.sql");

#[automock]
#[async_trait]
pub trait DeliveryCostsRepository: Send + Sync {
    /// Exact lookup; `None` when either key is absent.
    async fn get_cost(&self, state: &str, lga: &str) -> Result<Option<u64>, sqlx::Error>;

    /// Every leaf ordered by `(state, lga)`.
    async fn list_locations(&self) -> Result<Vec<LocationCost>, sqlx::Error>;

    /// States with at least one LGA, sorted.
    async fn list_states(&self) -> Result<Vec<String>, sqlx::Error>;

    /// LGAs under `state`, sorted.
    async fn list_lgas(&self, state: &str) -> Result<Vec<String>, sqlx::Error>;

    /// Insert or replace one leaf. Returns `true` when the leaf was created.
    async fn upsert_cost(&self, location: &LocationCost) -> Result<bool, sqlx::Error>;

    /// Change the cost of an existing leaf. Returns `false` when it does not exist.
    async fn update_cost(&self, location: &LocationCost) -> Result<bool, sqlx::Error>;

    /// Delete one leaf. Returns `false` when it does not exist.
    async fn remove_cost(&self, state: &str, lga: &str) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgDeliveryCostsRepository {
    db: Db,
}

impl PgDeliveryCostsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeliveryCostsRepository for PgDeliveryCostsRepository {
    async fn get_cost(&self, state: &str, lga: &str) -> Result<Option<u64>, sqlx::Error> {
        let cost: Option<i64> = query_scalar(GET_COST_SQL)
            .bind(state)
            .bind(lga)
            .fetch_optional(self.db.pool())
            .await?;

        cost.map(|cost| {
            u64::try_from(cost).map_err(|e| sqlx::Error::ColumnDecode {
                index: "cost".to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
    }

    async fn list_locations(&self) -> Result<Vec<LocationCost>, sqlx::Error> {
        let rows = query_as::<Postgres, LocationCostRow>(LIST_LOCATIONS_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn list_states(&self) -> Result<Vec<String>, sqlx::Error> {
        query_scalar(LIST_STATES_SQL)
            .fetch_all(self.db.pool())
            .await
    }

    async fn list_lgas(&self, state: &str) -> Result<Vec<String>, sqlx::Error> {
        query_scalar(LIST_LGAS_SQL)
            .bind(state)
            .fetch_all(self.db.pool())
            .await
    }

    async fn upsert_cost(&self, location: &LocationCost) -> Result<bool, sqlx::Error> {
        query_scalar(UPSERT_COST_SQL)
            .bind(&location.state)
            .bind(&location.lga)
            .bind(amount_param(location.cost)?)
            .fetch_one(self.db.pool())
            .await
    }

    async fn update_cost(&self, location: &LocationCost) -> Result<bool, sqlx::Error> {
        let rows_affected = query(UPDATE_COST_SQL)
            .bind(&location.state)
            .bind(&location.lga)
            .bind(amount_param(location.cost)?)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn remove_cost(&self, state: &str, lga: &str) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REMOVE_COST_SQL)
            .bind(state)
            .bind(lga)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

/// Row wrapper; [`LocationCost`] lives in the core crate.
struct LocationCostRow(LocationCost);

impl<'r> FromRow<'r, PgRow> for LocationCostRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(LocationCost {
            state: row.try_get("state")?,
            lga: row.try_get("lga")?,
            cost: try_get_amount(row, "cost")?,
        }))
    }
}
