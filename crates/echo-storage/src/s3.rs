use async_trait::async_trait;
use aws_sdk_s3::Client;
use echo_core::collections::{COUNTERS, counter_doc, document_key};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::merge::merge_json;
use crate::objects::{self, Precondition};
use crate::store::{DocumentStore, WriteBatch, WriteMode};

/// Conditional writes retried before giving up on a contended document.
pub const MAX_ATTEMPTS: u32 = 5;

/// Documents stored as JSON objects under `{collection}/{id}.json`.
///
/// Merges and counter increments are read-modify-write cycles guarded by
/// ETag preconditions. Batches are applied write by write and are not
/// atomic: a failure part way leaves the earlier writes in place.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    async fn load(&self, key: &str) -> Result<Option<(Value, String)>, StorageError> {
        match objects::get_object(&self.client, &self.bucket, key).await {
            Ok(output) => {
                let value: Value = serde_json::from_slice(&output.body)?;
                Ok(Some((value, output.etag.unwrap_or_default())))
            }
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read the document at `key`, let `update` compute its replacement, and
    /// write it back only if nobody else wrote in between.
    async fn update<T>(
        &self,
        key: &str,
        mut update: impl FnMut(Option<Value>) -> Result<(Value, T), StorageError>,
    ) -> Result<T, StorageError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let current = self.load(key).await?;
            let (etag, existing) = match current {
                Some((value, etag)) => (Some(etag), Some(value)),
                None => (None, None),
            };
            let (next, result) = update(existing)?;
            let precondition = match etag.as_deref() {
                Some(etag) => Precondition::IfMatch(etag),
                None => Precondition::IfAbsent,
            };
            let body = serde_json::to_vec_pretty(&next)?;
            match objects::put_json(&self.client, &self.bucket, key, body, precondition).await {
                Ok(_) => return Ok(result),
                Err(StorageError::PreconditionFailed { .. }) => {
                    debug!(key, attempt, "conditional write lost a race, retrying");
                }
                Err(e) => return Err(e),
            }
        }
        warn!(key, attempts = MAX_ATTEMPTS, "document update abandoned");
        Err(StorageError::Contention {
            key: key.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }

    async fn write(&self, key: &str, document: Value, mode: WriteMode) -> Result<(), StorageError> {
        if !document.is_object() {
            return Err(StorageError::NotAnObject {
                key: key.to_string(),
            });
        }
        match mode {
            WriteMode::Replace => {
                let body = serde_json::to_vec_pretty(&document)?;
                objects::put_json(&self.client, &self.bucket, key, body, Precondition::None)
                    .await?;
                Ok(())
            }
            WriteMode::Merge => {
                self.update(key, |existing| {
                    let mut merged = existing.unwrap_or_else(|| json!({}));
                    merge_json(&mut merged, document.clone());
                    Ok((merged, ()))
                })
                .await
            }
        }
    }
}

#[async_trait]
impl DocumentStore for S3Store {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StorageError> {
        Ok(self
            .load(&document_key(collection, id))
            .await?
            .map(|(value, _)| value))
    }

    async fn set(
        &self,
        collection: &str,
        id: &str,
        document: Value,
        mode: WriteMode,
    ) -> Result<(), StorageError> {
        self.write(&document_key(collection, id), document, mode).await
    }

    /// Writes are applied one at a time in batch order. A failure stops the
    /// batch; earlier writes stay applied.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let total = batch.len();
        for (applied, w) in batch.writes.into_iter().enumerate() {
            let key = document_key(&w.collection, &w.id);
            if let Err(err) = self.write(&key, w.document, w.mode).await {
                warn!(key = %key, applied, total, error = %err, "batch stopped");
                return Err(err);
            }
            debug!(key = %key, "batch write applied");
        }
        Ok(())
    }

    async fn increment_counter(&self, counter: &str) -> Result<u64, StorageError> {
        let key = document_key(COUNTERS, &counter_doc(counter));
        self.update(&key, |existing| {
            let current = match existing {
                Some(doc) => doc["current"]
                    .as_u64()
                    .ok_or_else(|| StorageError::InvalidCounter { key: key.clone() })?,
                None => 0,
            };
            let next = current + 1;
            Ok((json!({ "current": next }), next))
        })
        .await
    }
}
