use axum::Json;
use axum::extract::{Path, State};
use echo_chat::session::load_session;
use echo_chat::turn::{ChatRequest, ChatResponse, handle_chat};
use echo_forms::prefill::{patient_id_event, report_date_event};
use echo_forms::registry::REPORT_ID;
use echo_forms::state::{FormEvent, FormState};
use echo_forms::variant::{ASSISTED, FormVariant};
use echo_forms::visibility::{FormView, view};
use echo_storage::counter::next_id;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = handle_chat(state.store.as_ref(), &state.models, req).await?;
    Ok(Json(response))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillResponse {
    pub template_id: &'static str,
    #[serde(rename = "chatDocId")]
    pub chat_session_id: String,
    pub state: FormState,
    pub view: FormView,
}

/// A new assisted form for `session`: chat-extracted details filled in,
/// a fresh report ID, the patient ID derived and the report date set.
pub async fn prefill_form(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PrefillResponse>, ApiError> {
    let store = state.store.as_ref();
    let session = load_session(store, &session_id).await?;
    let variant: FormVariant = ASSISTED;
    let now = jiff::Zoned::now();

    let mut events = Vec::new();
    if let Some(extracted) = session.latest_extraction {
        events.push(FormEvent::Prefill { extracted });
    }
    events.push(FormEvent::SetField {
        key: REPORT_ID.to_string(),
        value: next_id(store, variant.report_id_kind).await,
    });
    events.push(report_date_event(now.datetime()));

    let mut form = FormState::replay(&variant, events)?;
    if let Some(event) = patient_id_event(&form, &variant, now.year()) {
        form = form.apply(&variant, event)?;
    }

    info!(session_id = %session_id, report_id = %form.value(REPORT_ID), "form prefilled from chat");

    Ok(Json(PrefillResponse {
        template_id: variant.id,
        chat_session_id: session_id,
        view: view(&form),
        state: form,
    }))
}
