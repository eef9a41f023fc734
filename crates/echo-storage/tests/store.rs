use async_trait::async_trait;
use echo_core::ids::IdKind;
use echo_storage::counter::next_id;
use echo_storage::documents::{load, load_optional, save};
use echo_storage::error::StorageError;
use echo_storage::memory::MemoryStore;
use echo_storage::merge::merge_json;
use echo_storage::store::{DocumentStore, WriteBatch, WriteMode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    title: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[tokio::test]
async fn missing_documents_are_none_or_not_found() {
    let store = MemoryStore::new();
    assert!(store.get("reports", "RA000001").await.unwrap().is_none());
    let err = load::<Note>(&store, "reports", "RA000001").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { key } if key == "reports/RA000001.json"));
}

#[tokio::test]
async fn typed_round_trip() {
    let store = MemoryStore::new();
    let note = Note {
        title: "hello".to_string(),
        tags: vec!["a".to_string()],
    };
    save(&store, "notes", "n1", &note, WriteMode::Replace).await.unwrap();
    assert_eq!(load::<Note>(&store, "notes", "n1").await.unwrap(), note);
    assert_eq!(load_optional::<Note>(&store, "notes", "n2").await.unwrap(), None);
}

#[tokio::test]
async fn merge_keeps_existing_fields_and_replace_drops_them() {
    let store = MemoryStore::new();
    store
        .set("reports", "RA1", json!({"status": "draft", "templateData": {"age": "50"}}), WriteMode::Replace)
        .await
        .unwrap();
    store
        .set(
            "reports",
            "RA1",
            json!({"status": "completed", "generatedReport": {"text": "<p>x</p>"}}),
            WriteMode::Merge,
        )
        .await
        .unwrap();
    let doc = store.get("reports", "RA1").await.unwrap().unwrap();
    assert_eq!(doc["status"], "completed");
    assert_eq!(doc["templateData"]["age"], "50");
    assert_eq!(doc["generatedReport"]["text"], "<p>x</p>");

    store
        .set("reports", "RA1", json!({"status": "draft"}), WriteMode::Replace)
        .await
        .unwrap();
    let doc = store.get("reports", "RA1").await.unwrap().unwrap();
    assert!(doc.get("templateData").is_none());
}

#[test]
fn merge_is_recursive_for_objects_only() {
    let mut target = json!({"a": {"b": 1, "c": [1, 2]}, "d": "x"});
    merge_json(&mut target, json!({"a": {"c": [3], "e": true}, "d": null}));
    assert_eq!(target, json!({"a": {"b": 1, "c": [3], "e": true}, "d": null}));
}

#[tokio::test]
async fn batch_applies_every_write_or_none() {
    let store = MemoryStore::new();
    let batch = WriteBatch::new()
        .set("reports", "RA000001", json!({"reportId": "RA000001"}), WriteMode::Replace)
        .set("patients", "P-JAN1970", json!({"name": "Jane"}), WriteMode::Merge);
    assert_eq!(batch.len(), 2);
    store.commit(batch).await.unwrap();
    assert_eq!(store.count("reports").await, 1);
    assert_eq!(store.count("patients").await, 1);

    let bad = WriteBatch::new()
        .set("reports", "RA000002", json!({"reportId": "RA000002"}), WriteMode::Replace)
        .set("patients", "P-X", json!("not an object"), WriteMode::Replace);
    assert!(matches!(
        store.commit(bad).await,
        Err(StorageError::NotAnObject { .. })
    ));
    assert_eq!(store.count("reports").await, 1);
}

#[tokio::test]
async fn counters_start_at_one_and_pad_ids() {
    let store = MemoryStore::new();
    assert_eq!(next_id(&store, IdKind::Report).await, "RA000001");
    assert_eq!(next_id(&store, IdKind::Report).await, "RA000002");
    assert_eq!(next_id(&store, IdKind::ManualReport).await, "RM000001");
    assert_eq!(next_id(&store, IdKind::ChatSession).await, "C000001");

    let counter = store.get("counters", "reports_echo_counter").await.unwrap().unwrap();
    assert_eq!(counter, json!({"current": 2}));
}

#[tokio::test]
async fn concurrent_increments_never_repeat() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.increment_counter("messages").await.unwrap() })
        })
        .collect();
    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.unwrap());
    }
    values.sort_unstable();
    assert_eq!(values, (1..=20).collect::<Vec<u64>>());
}

/// A store whose counter transactions always fail.
struct BrokenCounters;

#[async_trait]
impl DocumentStore for BrokenCounters {
    async fn get(&self, _: &str, _: &str) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _: &str, _: &str, _: Value, _: WriteMode) -> Result<(), StorageError> {
        Ok(())
    }

    async fn commit(&self, _: WriteBatch) -> Result<(), StorageError> {
        Ok(())
    }

    async fn increment_counter(&self, counter: &str) -> Result<u64, StorageError> {
        Err(StorageError::Contention {
            key: counter.to_string(),
            attempts: 5,
        })
    }
}

#[tokio::test]
async fn failed_counter_falls_back_to_timestamp_id() {
    let id = next_id(&BrokenCounters, IdKind::Message).await;
    let millis = id.strip_prefix("M-").expect("fallback prefix");
    assert!(millis.parse::<i64>().unwrap() > 1_700_000_000_000);
}

#[tokio::test]
#[ignore = "requires AWS credentials and ECHO_TEST_BUCKET"]
async fn s3_store_increments_counters() {
    let bucket = std::env::var("ECHO_TEST_BUCKET").expect("ECHO_TEST_BUCKET");
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);
    let store = echo_storage::s3::S3Store::new(client, bucket);
    let first = store.increment_counter("integration_test").await.unwrap();
    let second = store.increment_counter("integration_test").await.unwrap();
    assert_eq!(second, first + 1);
}
