use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;

/// How a write treats an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The new document replaces the old one entirely.
    Replace,
    /// Fields of the new document are merged into the old one.
    Merge,
}

#[derive(Debug, Clone)]
pub struct BatchWrite {
    pub collection: String,
    pub id: String,
    pub document: Value,
    pub mode: WriteMode,
}

/// Several document writes submitted together.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    pub writes: Vec<BatchWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, collection: &str, id: &str, document: Value, mode: WriteMode) -> Self {
        self.writes.push(BatchWrite {
            collection: collection.to_string(),
            id: id.to_string(),
            document,
            mode,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// A store of JSON documents addressed by collection and ID.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document; `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError>;

    async fn set(
        &self,
        collection: &str,
        id: &str,
        document: Value,
        mode: WriteMode,
    ) -> Result<(), StorageError>;

    /// Apply every write of the batch.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StorageError>;

    /// Atomically increment the named counter and return its new value.
    /// A counter that does not exist yet starts from zero.
    async fn increment_counter(&self, counter: &str) -> Result<u64, StorageError>;
}
