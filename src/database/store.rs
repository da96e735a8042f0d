use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewUser, User};

/// Errors from a user store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already stored: {0}")]
    DuplicateEmail(String),

    #[error("User {0} no longer exists")]
    Missing(i64),

    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence port for user records.
///
/// Validation and timestamps live in the handlers; the store only persists.
/// Implementations must reject a second row with an email that is already
/// stored.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new user and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Overwrite the row whose primary key is `user.id` and return it as
    /// stored.
    async fn update(&self, user: &User) -> Result<User, StoreError>;

    async fn delete(&self, user: &User) -> Result<(), StoreError>;

    /// Cheap connectivity probe used by `/health`.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Release connections on shutdown.
    async fn close(&self) {}
}
