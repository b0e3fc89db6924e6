//! Recipes Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{database::Db, domain::recipes::models::Recipe};

const GET_RECIPES_SQL: &str = include_str!("sql/get_recipes.sql");

#[automock]
#[async_trait]
pub trait RecipesRepository: Send + Sync {
    /// Recipes with the given ids. Unknown or deleted ids are skipped; order is unspecified.
    async fn get_recipes(&self, recipes: &[Uuid]) -> Result<Vec<Recipe>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgRecipesRepository {
    db: Db,
}

impl PgRecipesRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipesRepository for PgRecipesRepository {
    async fn get_recipes(&self, recipes: &[Uuid]) -> Result<Vec<Recipe>, sqlx::Error> {
        query_as::<Postgres, Recipe>(GET_RECIPES_SQL)
            .bind(recipes)
            .fetch_all(self.db.pool())
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Recipe {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            price: crate::domain::try_get_amount(row, "price")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
