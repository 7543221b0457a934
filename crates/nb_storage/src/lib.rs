use nb_core::{KeyValueStore, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod backends;
pub mod state;

pub use backends::*;
pub use state::{ListCounts, StateStore};

/// A named key/value backend.
pub trait StorageBackend: KeyValueStore {
    fn name(&self) -> &'static str;
}

/// Backend names accepted by [`create_store`].
pub const AVAILABLE_BACKENDS: &[&str] = &[
    "memory",
    #[cfg(feature = "sqlite")]
    "sqlite",
];

/// Opens the backend called `kind`. `location` is the database path for SQLite.
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub async fn create_store(kind: &str, location: Option<&Path>) -> Result<Arc<dyn KeyValueStore>> {
    match kind {
        "memory" => {
            let store = InMemoryStore::new();
            info!(backend = store.name(), "Opened store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let store = match location {
                Some(path) => SqliteStore::new_with_path(path).await?,
                None => SqliteStore::new().await?,
            };
            info!(backend = store.name(), path = ?store.get_db_path(), "Opened store");
            Ok(Arc::new(store))
        }
        other => Err(nb_core::Error::Storage(format!(
            "Unknown storage backend '{}' (available: {})",
            other,
            AVAILABLE_BACKENDS.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::state::{ListCounts, StateStore};
    pub use super::StorageBackend;
}
