//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::users::{UsersRepository, errors::UsersServiceError};

/// Resolve `actor` to an admin account.
///
/// # Errors
///
/// [`UsersServiceError::Unauthenticated`] without an actor, and
/// [`UsersServiceError::Forbidden`] when the actor is unknown or not an admin.
pub(crate) async fn require_admin(
    users: &dyn UsersRepository,
    actor: Option<Uuid>,
) -> Result<Uuid, UsersServiceError> {
    let actor = actor.ok_or(UsersServiceError::Unauthenticated)?;

    match users.find_user(actor).await? {
        Some(user) if user.is_admin() => Ok(actor),
        Some(_) | None => {
            debug!(%actor, "admin check refused");

            Err(UsersServiceError::Forbidden)
        }
    }
}

#[derive(Clone)]
pub struct DefaultUsersService {
    users: Arc<dyn UsersRepository>,
}

impl DefaultUsersService {
    #[must_use]
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UsersService for DefaultUsersService {
    async fn authorize_admin(&self, actor: Option<Uuid>) -> Result<Uuid, UsersServiceError> {
        require_admin(self.users.as_ref(), actor).await
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// The actor's id if it belongs to an admin.
    async fn authorize_admin(&self, actor: Option<Uuid>) -> Result<Uuid, UsersServiceError>;
}
