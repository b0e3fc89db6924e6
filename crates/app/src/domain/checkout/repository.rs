//! Checkouts Repository
//!
//! A checkout is priced once, when its payment starts. Completing it reads the
//! stored price back by payment reference instead of pricing the basket again.

use async_trait::async_trait;
use mealbox::{
    delivery::DeliveryAddress,
    rules::{FeeSource, OrderTotal},
};
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, types::Json};

use crate::{
    database::Db,
    domain::{
        amount_param,
        checkout::models::PendingCheckout,
        orders::models::OrderLine,
        try_get_amount,
    },
};

const INSERT_CHECKOUT_SQL: &str = include_str!("sql/insert_checkout.sql");
const GET_CHECKOUT_SQL: &str = include_str!("sql/get_checkout.sql");

#[automock]
#[async_trait]
pub trait CheckoutsRepository: Send + Sync {
    /// Record a priced checkout under its payment reference.
    async fn save_checkout(&self, checkout: &PendingCheckout) -> Result<(), sqlx::Error>;

    /// The checkout started with `reference`, if any.
    async fn get_checkout(
        &self,
        reference: &str,
    ) -> Result<Option<PendingCheckout>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCheckoutsRepository {
    db: Db,
}

impl PgCheckoutsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CheckoutsRepository for PgCheckoutsRepository {
    async fn save_checkout(&self, checkout: &PendingCheckout) -> Result<(), sqlx::Error> {
        let total = &checkout.total;

        query(INSERT_CHECKOUT_SQL)
            .bind(&checkout.reference)
            .bind(checkout.user_id)
            .bind(Json(&checkout.lines))
            .bind(Json(&checkout.address))
            .bind(amount_param(total.subtotal)?)
            .bind(amount_param(total.delivery_fee)?)
            .bind(amount_param(total.tax)?)
            .bind(amount_param(total.total)?)
            .bind(fee_source_name(total.fee_source))
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn get_checkout(
        &self,
        reference: &str,
    ) -> Result<Option<PendingCheckout>, sqlx::Error> {
        query_as::<Postgres, PendingCheckout>(GET_CHECKOUT_SQL)
            .bind(reference)
            .fetch_optional(self.db.pool())
            .await
    }
}

fn fee_source_name(source: FeeSource) -> &'static str {
    match source {
        FeeSource::Flat => "flat",
        FeeSource::Location => "location",
    }
}

fn parse_fee_source(name: &str) -> Result<FeeSource, sqlx::Error> {
    match name {
        "flat" => Ok(FeeSource::Flat),
        "location" => Ok(FeeSource::Location),
        other => Err(sqlx::Error::ColumnDecode {
            index: "fee_source".to_string(),
            source: format!("unknown fee source {other:?}").into(),
        }),
    }
}

impl<'r> FromRow<'r, PgRow> for PendingCheckout {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(lines) = row.try_get::<Json<Vec<OrderLine>>, _>("lines")?;
        let Json(address) = row.try_get::<Json<DeliveryAddress>, _>("address")?;
        let fee_source: String = row.try_get("fee_source")?;

        Ok(Self {
            reference: row.try_get("reference")?,
            user_id: row.try_get("user_uuid")?,
            lines,
            address,
            total: OrderTotal {
                subtotal: try_get_amount(row, "subtotal")?,
                delivery_fee: try_get_amount(row, "delivery_fee")?,
                tax: try_get_amount(row, "tax")?,
                total: try_get_amount(row, "total")?,
                fee_source: parse_fee_source(&fee_source)?,
            },
        })
    }
}
