pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub use memory::MemoryUserStore;
pub use models::{NewUser, User, UserInput};
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};

/// Pick the backing store: Postgres when a URL is configured, otherwise memory
pub async fn open_store(
    config: &DatabaseConfig,
    force_memory: bool,
) -> Result<Arc<dyn UserStore>, StoreError> {
    if force_memory || config.url.is_none() {
        if config.url.is_some() {
            warn!("DATABASE_URL is set but the in-memory store was requested");
        }
        info!("Using in-memory user store; data is lost on restart");
        return Ok(Arc::new(MemoryUserStore::new()));
    }

    let store = PgUserStore::connect(config).await?;
    info!("Using Postgres user store");
    Ok(Arc::new(store))
}
