//! Shared application state injected into the router.
//!
//! # Invariants
//! - One SQLite connection per process, guarded by a mutex.
//! - Store calls never run on async worker threads.

use crate::error::ApiError;
use attnviz_core::{
    RelevanceScorer, SqliteTextRepository, TextService, TextServiceResult, UniformRelevance,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// State shared by every request handler.
pub struct AppState {
    conn: Mutex<Connection>,
    scorer: Arc<dyn RelevanceScorer>,
}

impl AppState {
    /// Builds state over an opened, migrated connection with the default
    /// placeholder scorer.
    pub fn new(conn: Connection) -> Self {
        Self::with_scorer(conn, Arc::new(UniformRelevance))
    }

    /// Builds state with a caller-supplied relevance scorer.
    pub fn with_scorer(conn: Connection, scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self {
            conn: Mutex::new(conn),
            scorer,
        }
    }

    pub fn scorer(&self) -> &dyn RelevanceScorer {
        self.scorer.as_ref()
    }

    /// Runs `f` against a text service on the blocking pool.
    pub(crate) async fn with_text_service<T, F>(self: &Arc<Self>, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&TextService<SqliteTextRepository<'_>>) -> TextServiceResult<T> + Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let conn = state
                .conn
                .lock()
                .map_err(|_| ApiError::Internal("store connection lock poisoned".to_string()))?;
            let service = TextService::new(SqliteTextRepository::new(&conn));
            f(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("store task failed: {err}")))?
    }
}
