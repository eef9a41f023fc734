//! Typed access to store documents.

use echo_core::collections::document_key;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::store::{DocumentStore, WriteMode};

/// Load and deserialize a document; `NotFound` when it does not exist.
pub async fn load<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<T, StorageError> {
    load_optional(store, collection, id)
        .await?
        .ok_or_else(|| StorageError::NotFound {
            key: document_key(collection, id),
        })
}

pub async fn load_optional<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(collection, id).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write a document.
pub async fn save<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    value: &T,
    mode: WriteMode,
) -> Result<(), StorageError> {
    store
        .set(collection, id, serde_json::to_value(value)?, mode)
        .await
}
