//! Carts Repository

use async_trait::async_trait;
use mealbox::carts::{Cart, CartItem};
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, types::Json};
use uuid::Uuid;

use crate::{database::Db, domain::carts::models::StoredCart};

const GET_CART_SQL: &str = include_str!("sql/get_cart.sql");
const INSERT_CART_SQL: &str = include_str!("sql/insert_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("sql/update_cart.sql");

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// The cart belonging to `user`, if one has been saved.
    async fn get_cart(&self, user: Uuid) -> Result<Option<StoredCart>, sqlx::Error>;

    /// Save `cart` for `user`.
    ///
    /// With `expected_version` of `None` the cart is created only if the user has
    /// none; otherwise it is replaced only if the stored version still matches.
    /// Returns `None` when another writer got there first.
    async fn save_cart(
        &self,
        user: Uuid,
        cart: &Cart,
        expected_version: Option<i64>,
    ) -> Result<Option<StoredCart>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn get_cart(&self, user: Uuid) -> Result<Option<StoredCart>, sqlx::Error> {
        query_as::<Postgres, StoredCart>(GET_CART_SQL)
            .bind(user)
            .fetch_optional(self.db.pool())
            .await
    }

    async fn save_cart(
        &self,
        user: Uuid,
        cart: &Cart,
        expected_version: Option<i64>,
    ) -> Result<Option<StoredCart>, sqlx::Error> {
        match expected_version {
            None => {
                query_as::<Postgres, StoredCart>(INSERT_CART_SQL)
                    .bind(cart.id)
                    .bind(user)
                    .bind(Json(&cart.items))
                    .fetch_optional(self.db.pool())
                    .await
            }
            Some(version) => {
                query_as::<Postgres, StoredCart>(UPDATE_CART_SQL)
                    .bind(user)
                    .bind(Json(&cart.items))
                    .bind(version)
                    .fetch_optional(self.db.pool())
                    .await
            }
        }
    }
}

impl<'r> FromRow<'r, PgRow> for StoredCart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(items) = row.try_get::<Json<Vec<CartItem>>, _>("items")?;

        Ok(Self {
            cart: Cart {
                id: row.try_get("uuid")?,
                user_id: Some(row.try_get("user_uuid")?),
                items,
            },
            version: row.try_get("version")?,
        })
    }
}
