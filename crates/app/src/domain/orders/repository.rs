//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mealbox::{
    delivery::{DeliveryAddress, DeliveryMilestones, DeliveryRecord},
    orders::{DeliveryStatus, Order, StatusChange},
};
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{amount_param, orders::models::NewOrderRecord, try_get_amount},
};

const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const INSERT_DELIVERY_SQL: &str = include_str!("sql/insert_delivery.sql");
const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_DELIVERY_SQL: &str = include_str!("sql/get_delivery.sql");
const TRANSITION_ORDER_SQL: &str = include_str!("sql/transition_order.sql");
const STAMP_DELIVERY_SQL: &str = include_str!("sql/stamp_delivery.sql");

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Write the transaction, delivery and order together. Nothing is written on failure.
    async fn create_order(&self, record: &NewOrderRecord) -> Result<(), sqlx::Error>;

    /// Look up an order.
    async fn get_order(&self, order: Uuid) -> Result<Option<Order>, sqlx::Error>;

    /// Look up a delivery record.
    async fn get_delivery(&self, delivery: Uuid) -> Result<Option<DeliveryRecord>, sqlx::Error>;

    /// Apply `change` only if the stored status still equals `change.previous`,
    /// stamping the matching delivery milestone in the same transaction.
    ///
    /// Returns `None` when the order is missing or its status has moved on.
    async fn transition_status(
        &self,
        order: Uuid,
        change: StatusChange,
    ) -> Result<Option<Order>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, record: &NewOrderRecord) -> Result<(), sqlx::Error> {
        let NewOrderRecord {
            order,
            delivery,
            transaction,
        } = record;

        let mut tx = self.db.begin().await?;

        query(INSERT_TRANSACTION_SQL)
            .bind(transaction.uuid)
            .bind(&transaction.reference)
            .bind(transaction.user_id)
            .bind(amount_param(transaction.amount)?)
            .bind(&transaction.status)
            .bind(SqlxTimestamp::from(transaction.created_at))
            .execute(&mut *tx)
            .await?;

        let address = &delivery.address;

        query(INSERT_DELIVERY_SQL)
            .bind(delivery.id)
            .bind(&address.name)
            .bind(&address.email)
            .bind(&address.phone)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.lga)
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&mut *tx)
            .await?;

        query(INSERT_ORDER_SQL)
            .bind(order.id)
            .bind(order.user_id)
            .bind(&order.recipe_ids)
            .bind(amount_param(order.amount)?)
            .bind(order.delivery_id)
            .bind(order.transaction_id)
            .bind(order.delivery_status.as_str())
            .bind(order.received_status.as_str())
            .bind(SqlxTimestamp::from(order.created_at))
            .bind(SqlxTimestamp::from(order.updated_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }

    async fn get_order(&self, order: Uuid) -> Result<Option<Order>, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|row| row.0))
    }

    async fn get_delivery(&self, delivery: Uuid) -> Result<Option<DeliveryRecord>, sqlx::Error> {
        let row = query_as::<Postgres, DeliveryRow>(GET_DELIVERY_SQL)
            .bind(delivery)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|row| row.0))
    }

    async fn transition_status(
        &self,
        order: Uuid,
        change: StatusChange,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let updated = query_as::<Postgres, OrderRow>(TRANSITION_ORDER_SQL)
            .bind(order)
            .bind(change.previous.as_str())
            .bind(change.current.as_str())
            .bind(SqlxTimestamp::from(change.changed_at))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(OrderRow(updated)) = updated else {
            return Ok(None);
        };

        query(STAMP_DELIVERY_SQL)
            .bind(updated.delivery_id)
            .bind(change.current.as_str())
            .bind(SqlxTimestamp::from(change.changed_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }
}

/// Row wrapper; [`Order`] lives in the core crate.
struct OrderRow(Order);

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Order {
            id: row.try_get("uuid")?,
            user_id: row.try_get("user_uuid")?,
            recipe_ids: row.try_get("recipe_uuids")?,
            amount: try_get_amount(row, "amount")?,
            delivery_id: row.try_get("delivery_uuid")?,
            transaction_id: row.try_get("transaction_uuid")?,
            delivery_status: try_get_parsed(row, "delivery_status")?,
            received_status: try_get_parsed(row, "received_status")?,
            delivery_date: try_get_timestamp(row, "delivery_date")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        }))
    }
}

/// Row wrapper; [`DeliveryRecord`] lives in the core crate.
struct DeliveryRow(DeliveryRecord);

impl<'r> FromRow<'r, PgRow> for DeliveryRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(DeliveryRecord {
            id: row.try_get("uuid")?,
            address: DeliveryAddress {
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                street: row.try_get("street")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                lga: row.try_get("lga")?,
            },
            milestones: DeliveryMilestones {
                pending_at: try_get_timestamp(row, "pending_at")?,
                packed_at: try_get_timestamp(row, "packed_at")?,
                in_transit_at: try_get_timestamp(row, "in_transit_at")?,
                delivered_at: try_get_timestamp(row, "delivered_at")?,
                failed_at: try_get_timestamp(row, "failed_at")?,
            },
        }))
    }
}

fn try_get_timestamp(row: &PgRow, col: &str) -> Result<Option<jiff::Timestamp>, sqlx::Error> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(col)?
        .map(SqlxTimestamp::to_jiff))
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mealbox::orders::OrderDraft;
    use testresult::TestResult;

    use crate::{
        domain::orders::models::TransactionRecord,
        test::{db::TestDb, fixtures},
    };

    use super::*;

    fn record(at: Timestamp) -> TestResult<NewOrderRecord> {
        let order = Order::place(
            OrderDraft {
                id: Uuid::now_v7(),
                user_id: None,
                recipe_ids: vec![Uuid::now_v7()],
                amount: 5_675,
                delivery_id: Uuid::now_v7(),
                transaction_id: Uuid::now_v7(),
            },
            at,
        )?;

        Ok(NewOrderRecord {
            delivery: DeliveryRecord::new(order.delivery_id, fixtures::address(), at),
            transaction: TransactionRecord {
                uuid: order.transaction_id,
                reference: format!("ref-{}", order.id.simple()),
                user_id: None,
                amount: order.amount,
                status: "success".to_string(),
                created_at: at,
            },
            order,
        })
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn create_then_transition_round_trips() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOrdersRepository::new(Db::new(db.pool().clone()));
        let at = Timestamp::now();
        let record = record(at)?;

        repository.create_order(&record).await?;

        let mut expected = record.order.clone();
        let change = expected.apply_status(DeliveryStatus::Packed, Timestamp::now())?;

        let updated = repository.transition_status(record.order.id, change).await?;
        let stale = repository.transition_status(record.order.id, change).await?;
        let delivery = repository.get_delivery(record.delivery.id).await?;

        assert_eq!(
            updated.map(|order| order.delivery_status),
            Some(DeliveryStatus::Packed)
        );
        assert_eq!(stale, None);
        assert!(
            delivery.is_some_and(|delivery| delivery.milestones.packed_at.is_some()),
            "packed milestone should be stamped"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn duplicate_payment_reference_writes_nothing() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOrdersRepository::new(Db::new(db.pool().clone()));
        let first = record(Timestamp::now())?;
        let mut second = record(Timestamp::now())?;
        second.transaction.reference.clone_from(&first.transaction.reference);

        repository.create_order(&first).await?;
        let result = repository.create_order(&second).await;

        assert!(result.is_err(), "duplicate reference should fail");
        assert_eq!(repository.get_order(second.order.id).await?, None);
        assert_eq!(repository.get_delivery(second.delivery.id).await?, None);

        Ok(())
    }
}
