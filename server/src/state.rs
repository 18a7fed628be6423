use std::sync::Arc;

use tracing::error;

use crate::store::{DataManager, StoreError};
use crate::utils::error::AppError;

/// Shared by every handler. Identity is not stored here; it is resolved per
/// request from the caller's credentials.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataManager>,
}

impl AppState {
    pub fn new(store: DataManager) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Runs a store operation on the blocking pool. Every operation reads and
    /// rewrites the data file, so it must stay off the async workers.
    pub async fn with_store<T, F>(&self, operation: F) -> Result<T, AppError>
    where
        F: FnOnce(&DataManager) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);

        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                AppError::InternalServerError("Storage task failed".to_string())
            })?
            .map_err(AppError::from)
    }
}
