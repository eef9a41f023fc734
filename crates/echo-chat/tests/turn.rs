use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use echo_chat::error::ChatError;
use echo_chat::model::{OVERLOADED_MESSAGE, TextModel, generate_ai_response};
use echo_chat::session::load_session;
use echo_chat::turn::{ChatRequest, handle_chat};
use echo_core::collections::chat_messages;
use echo_core::models::chat::{ChatMessageDoc, ExtractedData, MessageRole};
use echo_storage::documents::load;
use echo_storage::memory::MemoryStore;

struct Scripted {
    id: &'static str,
    reply: Result<&'static str, &'static str>,
    calls: Arc<AtomicUsize>,
}

impl Scripted {
    fn ok(id: &'static str, reply: &'static str) -> Box<dyn TextModel> {
        Box::new(Self {
            id,
            reply: Ok(reply),
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn failing(id: &'static str, calls: Arc<AtomicUsize>) -> Box<dyn TextModel> {
        Box::new(Self {
            id,
            reply: Err("throttled"),
            calls,
        })
    }
}

#[async_trait]
impl TextModel for Scripted {
    fn model_id(&self) -> &str {
        self.id
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(str::to_string)
            .map_err(|e| ChatError::Invocation(e.to_string()))
    }
}

const LIVER_REPLY: &str = r#"```json
{"examType": "CT Liver", "patientName": "John Doe", "age": 45, "gender": "male", "dob": null, "ai_response": "Preparing the CT Liver template."}
```"#;

fn request(session: Option<&str>, message: &str) -> ChatRequest {
    ChatRequest {
        user_id: "U000001".to_string(),
        chat_doc_id: session.map(str::to_string),
        message: message.to_string(),
        prior_extracted_data: None,
        auth_uid: "uid-1".to_string(),
        user_email: "doc@example.com".to_string(),
    }
}

#[tokio::test]
async fn falls_back_to_the_next_model() {
    let calls = Arc::new(AtomicUsize::new(0));
    let models = vec![
        Scripted::failing("first", calls.clone()),
        Scripted::ok("second", "not json at all"),
        Scripted::ok("third", LIVER_REPLY),
    ];
    let response = generate_ai_response(&models, "liver CT for John Doe", None).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.model_id.as_deref(), Some("third"));
    assert_eq!(response.ai_message, "Preparing the CT Liver template.");
    assert_eq!(response.suggested_template.as_deref(), Some("T001"));
}

#[tokio::test]
async fn all_models_failing_returns_prior_unchanged() {
    let calls = Arc::new(AtomicUsize::new(0));
    let models = vec![
        Scripted::failing("a", calls.clone()),
        Scripted::failing("b", calls.clone()),
    ];
    let prior = ExtractedData {
        patient_name: Some("Jane Roe".to_string()),
        ..ExtractedData::default()
    };
    let response = generate_ai_response(&models, "hello", Some(&prior)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(response.ai_message, OVERLOADED_MESSAGE);
    assert_eq!(response.extracted, prior);
    assert_eq!(response.suggested_template, None);
    assert_eq!(response.model_id, None);
}

#[tokio::test]
async fn chat_turn_creates_session_and_persists_messages() {
    let store = MemoryStore::new();
    let models = vec![Scripted::ok("m", LIVER_REPLY)];

    let response = handle_chat(&store, &models, request(None, "CT liver, John Doe 45"))
        .await
        .unwrap();
    assert_eq!(response.chat_doc_id, "C000001");
    assert_eq!(response.suggested_template.as_deref(), Some("T001"));

    let session = load_session(&store, "C000001").await.unwrap();
    assert_eq!(session.auth_uid, "uid-1");
    let latest = session.latest_extraction.unwrap();
    assert_eq!(latest.patient_name.as_deref(), Some("John Doe"));

    let messages = chat_messages("C000001");
    assert_eq!(store.count(&messages).await, 2);
    let user: ChatMessageDoc = load(&store, &messages, "M000001").await.unwrap();
    assert_eq!(user.role, MessageRole::User);
    assert_eq!(user.extracted_data, None);
    let bot: ChatMessageDoc = load(&store, &messages, "M000002").await.unwrap();
    assert_eq!(bot.role, MessageRole::Bot);
    assert_eq!(bot.suggested_template.as_deref(), Some("T001"));
}

#[tokio::test]
async fn follow_up_turn_uses_session_memory() {
    let store = MemoryStore::new();
    handle_chat(&store, &[Scripted::ok("m", LIVER_REPLY)], request(None, "first"))
        .await
        .unwrap();

    let dob_only = r#"{"examType": null, "patientName": null, "age": null, "gender": null, "dob": "1980-02-01"}"#;
    let response = handle_chat(
        &store,
        &[Scripted::ok("m", dob_only)],
        request(Some("C000001"), "born 1 Feb 1980"),
    )
    .await
    .unwrap();

    let extracted = response.extracted_data.unwrap();
    assert_eq!(extracted.patient_name.as_deref(), Some("John Doe"));
    assert_eq!(extracted.dob.as_deref(), Some("1980-02-01"));
    assert_eq!(store.count(&chat_messages("C000001")).await, 4);
}

#[tokio::test]
async fn unknown_session_and_empty_message_are_rejected() {
    let store = MemoryStore::new();
    let models = vec![Scripted::ok("m", LIVER_REPLY)];

    let err = handle_chat(&store, &models, request(Some("C999999"), "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::SessionNotFound(id) if id == "C999999"));

    let err = handle_chat(&store, &models, request(None, "   ")).await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyMessage));
}
