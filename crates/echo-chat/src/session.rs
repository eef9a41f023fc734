//! Chat session and message documents.

use echo_core::collections::{CHAT_SESSIONS, chat_messages};
use echo_core::ids::IdKind;
use echo_core::models::chat::{ChatMessageDoc, ChatSession, ExtractedData, MessageRole};
use echo_storage::counter::next_id;
use echo_storage::documents::{load_optional, save};
use echo_storage::store::{DocumentStore, WriteMode};
use serde_json::json;
use tracing::info;

use crate::error::ChatError;

/// Who is chatting. The auth UID and email come from the external identity
/// provider.
#[derive(Debug, Clone, Default)]
pub struct Participant {
    pub user_id: String,
    pub auth_uid: String,
    pub user_email: String,
}

/// Load the session `session_id`, or start a new one when no ID is given.
///
/// A given ID that does not exist is [`ChatError::SessionNotFound`].
pub async fn ensure_session(
    store: &dyn DocumentStore,
    session_id: Option<&str>,
    participant: &Participant,
    now: jiff::Timestamp,
) -> Result<ChatSession, ChatError> {
    if let Some(id) = session_id.filter(|id| !id.trim().is_empty()) {
        return load_session(store, id).await;
    }

    let session = ChatSession {
        session_id: next_id(store, IdKind::ChatSession).await,
        user_id: participant.user_id.clone(),
        auth_uid: participant.auth_uid.clone(),
        user_email: participant.user_email.clone(),
        start_time: now,
        last_updated: now,
        latest_extraction: None,
    };
    save(store, CHAT_SESSIONS, &session.session_id, &session, WriteMode::Replace).await?;
    info!(session_id = %session.session_id, "chat session started");
    Ok(session)
}

pub async fn load_session(store: &dyn DocumentStore, session_id: &str) -> Result<ChatSession, ChatError> {
    load_optional(store, CHAT_SESSIONS, session_id)
        .await?
        .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))
}

/// Append a message to the session under a fresh `M` ID.
pub async fn save_message(
    store: &dyn DocumentStore,
    session_id: &str,
    role: MessageRole,
    text: &str,
    extracted_data: Option<ExtractedData>,
    suggested_template: Option<String>,
    now: jiff::Timestamp,
) -> Result<ChatMessageDoc, ChatError> {
    let message = ChatMessageDoc {
        message_id: next_id(store, IdKind::Message).await,
        role,
        text: text.to_string(),
        timestamp: now,
        extracted_data,
        suggested_template,
    };
    save(
        store,
        &chat_messages(session_id),
        &message.message_id,
        &message,
        WriteMode::Replace,
    )
    .await?;
    Ok(message)
}

/// Record the latest extraction on the session document.
pub async fn update_latest_extraction(
    store: &dyn DocumentStore,
    session_id: &str,
    extracted: &ExtractedData,
    now: jiff::Timestamp,
) -> Result<(), ChatError> {
    let patch = json!({
        "latestExtraction": serde_json::to_value(extracted)?,
        "lastUpdated": serde_json::to_value(now)?,
    });
    store
        .set(CHAT_SESSIONS, session_id, patch, WriteMode::Merge)
        .await?;
    Ok(())
}
