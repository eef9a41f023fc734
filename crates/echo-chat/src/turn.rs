//! One chat turn: persist the user message, ask the model, persist the reply.

use echo_core::models::chat::{ExtractedData, MessageRole};
use echo_storage::store::DocumentStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChatError;
use crate::model::{TextModel, generate_ai_response};
use crate::session::{Participant, ensure_session, save_message, update_latest_extraction};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Empty or absent starts a new session.
    #[serde(rename = "chatDocId", default)]
    pub chat_doc_id: Option<String>,
    pub message: String,
    #[serde(rename = "priorExtractedData", default)]
    pub prior_extracted_data: Option<ExtractedData>,
    #[serde(rename = "authUid", default)]
    pub auth_uid: String,
    #[serde(rename = "userEmail", default)]
    pub user_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub ai_message: String,
    pub extracted_data: Option<ExtractedData>,
    pub suggested_template: Option<String>,
    #[serde(rename = "chatDocId")]
    pub chat_doc_id: String,
}

/// Run one chat turn against `models`, persisting both messages.
///
/// Prior extracted data comes from the request when present, otherwise
/// from the session's latest extraction.
pub async fn handle_chat(
    store: &dyn DocumentStore,
    models: &[Box<dyn TextModel>],
    request: ChatRequest,
) -> Result<ChatResponse, ChatError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let participant = Participant {
        user_id: request.user_id.clone(),
        auth_uid: request.auth_uid.clone(),
        user_email: request.user_email.clone(),
    };
    let session = ensure_session(
        store,
        request.chat_doc_id.as_deref(),
        &participant,
        jiff::Timestamp::now(),
    )
    .await?;

    info!(session_id = %session.session_id, user_id = %request.user_id, "chat message received");

    save_message(
        store,
        &session.session_id,
        MessageRole::User,
        message,
        None,
        None,
        jiff::Timestamp::now(),
    )
    .await?;

    let prior = request
        .prior_extracted_data
        .or(session.latest_extraction);
    let response = generate_ai_response(models, message, prior.as_ref()).await;

    let now = jiff::Timestamp::now();
    save_message(
        store,
        &session.session_id,
        MessageRole::Bot,
        &response.ai_message,
        Some(response.extracted.clone()),
        response.suggested_template.clone(),
        now,
    )
    .await?;
    update_latest_extraction(store, &session.session_id, &response.extracted, now).await?;

    Ok(ChatResponse {
        ai_message: response.ai_message,
        extracted_data: Some(response.extracted),
        suggested_template: response.suggested_template,
        chat_doc_id: session.session_id,
    })
}
