//! Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::users::models::{Role, User},
};

const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const LIST_ADMINS_SQL: &str = include_str!("sql/list_admins.sql");
const SET_ROLE_SQL: &str = include_str!("sql/set_role.sql");

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look up a user by id.
    async fn find_user(&self, user: Uuid) -> Result<Option<User>, sqlx::Error>;

    /// Every user with the admin role.
    async fn list_admins(&self) -> Result<Vec<User>, sqlx::Error>;

    /// Change the role of the user with `email`, returning the number of rows changed.
    async fn set_role(&self, email: &str, role: Role) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    db: Db,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user(&self, user: Uuid) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(FIND_USER_SQL)
            .bind(user)
            .fetch_optional(self.db.pool())
            .await
    }

    async fn list_admins(&self) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_ADMINS_SQL)
            .fetch_all(self.db.pool())
            .await
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ROLE_SQL)
            .bind(email)
            .bind(role.as_str())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: role.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
