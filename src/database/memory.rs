use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

/// Process-local store used when no database is configured, and by tests.
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

struct Inner {
    rows: BTreeMap<i64, User>,
    // Ids are handed out monotonically and never reused after a delete
    next_id: i64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn email_owner(&self, email: &str) -> Option<i64> {
        self.rows
            .values()
            .find(|u| u.email == email)
            .map(|u| u.id)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_owner(&user.email).is_some() {
            return Err(StoreError::DuplicateEmail(user.email));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = user.into_user(id);
        inner.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(owner) = inner.email_owner(&user.email) {
            if owner != user.id {
                return Err(StoreError::DuplicateEmail(user.email.clone()));
            }
        }

        match inner.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(row.clone())
            }
            None => Err(StoreError::Missing(user.id)),
        }
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .rows
            .remove(&user.id)
            .map(|_| ())
            .ok_or(StoreError::Missing(user.id))
    }
}
