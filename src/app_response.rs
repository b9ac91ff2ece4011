use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::store_error::StoreError;

/// Envelope serialized to JSON for every FFI call that returns a string.
#[derive(Debug, Serialize, Deserialize)]
pub enum AppResponse {
    StorageUnavailable(String),
    DatabaseError(String),
    SerializationError(String),
    BadRequest(String),
    Ok(String),
}

impl From<StoreError> for AppResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StorageUnavailable(msg) => AppResponse::StorageUnavailable(msg),
            // Internal to the store: mark_found turns it into a no-op before it gets here.
            StoreError::RecordNotFound(id) => {
                AppResponse::DatabaseError(format!("No location with id {}", id))
            }
            StoreError::Database(e) => AppResponse::DatabaseError(e.to_string()),
        }
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    /// Serializes `value` into an `Ok` payload.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => AppResponse::Ok(json),
            Err(e) => AppResponse::from(e),
        }
    }
}
