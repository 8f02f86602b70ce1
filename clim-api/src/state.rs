//! Shared handler state

use crate::error::{ApiError, ApiResult};
use clim_db::{Database, DbResult};

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Run a store query on the blocking pool.
    ///
    /// SQLite calls block, so they never run on the async worker threads.
    pub async fn query<T, F>(&self, query: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> DbResult<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || query(&db))
            .await
            .map_err(|e| ApiError::TaskFailed(e.to_string()))?
            .map_err(ApiError::from)
    }
}
