//! Shared application state for the metrics server.

use std::sync::Arc;

use mymetrics_core::{MetricsError, Result};

use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }

    /// Run a storage operation off the async workers.
    ///
    /// Storage calls take a blocking lock and may write the snapshot file.
    pub async fn with_storage<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&dyn Storage) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = self.storage();
        tokio::task::spawn_blocking(move || op(storage.as_ref()))
            .await
            .map_err(|e| MetricsError::Internal(format!("storage task failed: {e}")))?
    }
}
