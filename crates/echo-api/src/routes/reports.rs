use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use echo_core::collections::{PATIENTS, REPORTS, REPORTS_MANUAL};
use echo_core::ids::IdKind;
use echo_core::models::patient::Patient;
use echo_core::models::report::{ReportDocument, ReportStatus};
use echo_export::docx::generate_docx;
use echo_export::narrative::render_report;
use echo_export::render::{StandardReport, render_standard_report};
use echo_export::styles::DocumentStyles;
use echo_forms::registry::{PATIENT_ID, REPORT_ID};
use echo_forms::variant::FormVariant;
use echo_storage::documents::load;
use echo_storage::store::{DocumentStore, WriteBatch, WriteMode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::form::FormInput;
use crate::routes::templates::find_template;
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Collection holding `report_id`, by its prefix.
pub fn collection_for(report_id: &str) -> &'static str {
    if IdKind::ManualReport.owns(report_id) {
        REPORTS_MANUAL
    } else {
        REPORTS
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub template_id: String,
    #[serde(default, rename = "chatDocId")]
    pub chat_session_id: Option<String>,
    #[serde(flatten)]
    pub form: FormInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub report_id: String,
    pub patient_id: String,
    pub status: ReportStatus,
}

/// Report and patient IDs must be present; manual reports must carry an
/// `RM` report ID.
fn check_identity(variant: &FormVariant, report_id: &str, patient_id: &str) -> Result<(), ApiError> {
    if report_id.is_empty() {
        return Err(ApiError::BadRequest("report ID is missing".to_string()));
    }
    if patient_id.is_empty() {
        return Err(ApiError::BadRequest("patient ID is missing".to_string()));
    }
    if variant.report_id_kind == IdKind::ManualReport && !IdKind::ManualReport.owns(report_id) {
        return Err(ApiError::BadRequest(format!(
            "manual reports need an {} report ID, got {report_id}",
            IdKind::ManualReport.prefix()
        )));
    }
    Ok(())
}

/// Validate, check identity, collect, then write the report (and for the
/// assisted form the patient) in one batch.
pub async fn submit_report(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let template = find_template(&req.template_id)?;
    let variant = *template.variant();
    let form = req.form.into_state(template.as_ref())?;

    let missing = template.validate(&form);
    if !missing.is_empty() {
        info!(template_id = variant.id, missing = missing.len(), "submission failed validation");
        return Err(ApiError::Validation {
            missing: missing.iter().map(ToString::to_string).collect(),
        });
    }

    let report_id = form.value(REPORT_ID).trim().to_string();
    let patient_id = form.value(PATIENT_ID).trim().to_string();
    check_identity(&variant, &report_id, &patient_id)?;

    let _guard = state.in_flight.try_acquire(&report_id).ok_or_else(|| {
        ApiError::Conflict(format!("report {report_id} is already being saved"))
    })?;

    let record = template.collect(&form);
    let now = jiff::Timestamp::now();
    let document = ReportDocument {
        report_id: report_id.clone(),
        patient_id: patient_id.clone(),
        chat_session_id: req.chat_session_id.filter(|id| !id.trim().is_empty()),
        template_type: variant.template_type.to_string(),
        status: variant.initial_status,
        template_data: record,
        generated_report: None,
        created_at: now,
        updated_at: now,
    };

    let to_value = |value: serde_json::Result<serde_json::Value>| {
        value.map_err(|e| ApiError::Internal(e.to_string()))
    };
    // Stores without atomic batches apply writes in order: the patient
    // merge goes first so a stored report always has its patient.
    let mut batch = WriteBatch::new();
    if variant.writes_patient {
        let patient = Patient::from_record(&patient_id, &document.template_data, now);
        batch = batch.set(
            PATIENTS,
            &patient_id,
            to_value(serde_json::to_value(&patient))?,
            WriteMode::Merge,
        );
    }
    batch = batch.set(
        variant.report_collection,
        &report_id,
        to_value(serde_json::to_value(&document))?,
        WriteMode::Replace,
    );
    state.store.commit(batch).await?;

    info!(
        report_id = %report_id,
        patient_id = %patient_id,
        collection = variant.report_collection,
        "report saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            report_id,
            patient_id,
            status: variant.initial_status,
        }),
    ))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportDocument>, ApiError> {
    let document: ReportDocument = load(state.store.as_ref(), collection_for(&id), &id).await?;
    Ok(Json(document))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportText {
    pub report_id: String,
    pub text: String,
    /// Whether the text was already stored rather than rendered now.
    pub cached: bool,
}

async fn store_text(
    store: &dyn DocumentStore,
    report_id: &str,
    text: &str,
) -> Result<(), ApiError> {
    let patch = json!({
        "generatedReport": { "text": text },
        "status": ReportStatus::Completed,
        "updatedAt": jiff::Timestamp::now(),
    });
    store
        .set(collection_for(report_id), report_id, patch, WriteMode::Merge)
        .await?;
    Ok(())
}

/// Return the stored narrative, rendering and storing it on first use.
pub async fn generate_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportText>, ApiError> {
    let store = state.store.as_ref();
    let document: ReportDocument = load(store, collection_for(&id), &id).await?;

    if let Some(text) = document.generated_text() {
        return Ok(Json(ReportText {
            report_id: id,
            text: text.to_string(),
            cached: true,
        }));
    }

    let text = render_report(&document.template_data);
    store_text(store, &id, &text).await?;
    info!(report_id = %id, "narrative generated");

    Ok(Json(ReportText {
        report_id: id,
        text,
        cached: false,
    }))
}

#[derive(Deserialize)]
pub struct SaveTextRequest {
    pub text: String,
}

/// Replace the narrative with the doctor's edited text.
pub async fn save_report_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SaveTextRequest>,
) -> Result<Json<ReportText>, ApiError> {
    let store = state.store.as_ref();
    load::<ReportDocument>(store, collection_for(&id), &id).await?;
    store_text(store, &id, &req.text).await?;
    info!(report_id = %id, "report text saved");

    Ok(Json(ReportText {
        report_id: id,
        text: req.text,
        cached: false,
    }))
}

async fn standard_report(store: &dyn DocumentStore, id: &str) -> Result<StandardReport, ApiError> {
    let document: ReportDocument = load(store, collection_for(id), id).await?;
    let body = match document.generated_text() {
        Some(text) => text.to_string(),
        None => render_report(&document.template_data),
    };
    Ok(StandardReport::new(&document, &body))
}

pub async fn report_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let report = standard_report(state.store.as_ref(), &id).await?;
    Ok(Html(render_standard_report(&report)?))
}

pub async fn report_docx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = standard_report(state.store.as_ref(), &id).await?;
    let bytes = generate_docx(&report, &DocumentStyles::default())?;
    let disposition = format!("attachment; filename=\"{id}.docx\"");

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
