use thiserror::Error;

/// Failures raised by [`LocationStore`](crate::location_store::LocationStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or initialized, or has been closed.
    /// Fatal for the current session.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// No row matches the id. Only used internally: `mark_found` turns it into a no-op.
    #[error("No location with id {0}")]
    RecordNotFound(i64),

    #[error("SQLite error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn unavailable(context: &str, err: impl std::fmt::Display) -> Self {
        StoreError::StorageUnavailable(format!("{context}: {err}"))
    }
}
