use std::collections::BTreeMap;

use async_trait::async_trait;
use echo_core::collections::{COUNTERS, counter_doc, document_key};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::merge::merge_json;
use crate::store::{DocumentStore, WriteBatch, WriteMode};

/// In-process document store. Batches are applied under one lock, so they
/// are atomic with respect to other callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents under `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let prefix = format!("{collection}/");
        self.documents
            .lock()
            .await
            .keys()
            .filter(|k| k.strip_prefix(&prefix).is_some_and(|rest| !rest.contains('/')))
            .count()
    }
}

fn write(
    documents: &mut BTreeMap<String, Value>,
    key: String,
    document: Value,
    mode: WriteMode,
) -> Result<(), StorageError> {
    if !document.is_object() {
        return Err(StorageError::NotAnObject { key });
    }
    match (mode, documents.get_mut(&key)) {
        (WriteMode::Merge, Some(existing)) => merge_json(existing, document),
        _ => {
            documents.insert(key, document);
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError> {
        let key = document_key(collection, id);
        Ok(self.documents.lock().await.get(&key).cloned())
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        document: Value,
        mode: WriteMode,
    ) -> Result<(), StorageError> {
        let mut documents = self.documents.lock().await;
        write(&mut documents, document_key(collection, id), document, mode)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut documents = self.documents.lock().await;
        // Reject the whole batch before applying any write.
        for w in &batch.writes {
            if !w.document.is_object() {
                return Err(StorageError::NotAnObject {
                    key: document_key(&w.collection, &w.id),
                });
            }
        }
        for w in batch.writes {
            write(&mut documents, document_key(&w.collection, &w.id), w.document, w.mode)?;
        }
        Ok(())
    }

    async fn increment_counter(&self, counter: &str) -> Result<u64, StorageError> {
        let key = document_key(COUNTERS, &counter_doc(counter));
        let mut documents = self.documents.lock().await;
        let current = match documents.get(&key) {
            Some(doc) => doc["current"]
                .as_u64()
                .ok_or_else(|| StorageError::InvalidCounter { key: key.clone() })?,
            None => 0,
        };
        let next = current + 1;
        documents.insert(key, json!({ "current": next }));
        Ok(next)
    }
}
