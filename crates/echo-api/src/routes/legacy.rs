//! `POST /api/generate-standard-report`, kept for older frontends.

use axum::Json;
use echo_core::models::record::FormRecord;
use echo_export::narrative::render_report;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[serde(rename = "chatDocId", default)]
    pub chat_session_id: Option<String>,
    pub template_type: String,
    pub template_data: FormRecord,
}

#[derive(Serialize)]
pub struct GenerateReportResponse {
    pub report_text: String,
}

pub async fn generate_standard_report(
    Json(req): Json<GenerateReportRequest>,
) -> Json<GenerateReportResponse> {
    info!(
        template_type = %req.template_type,
        chat_session_id = req.chat_session_id.as_deref().unwrap_or(""),
        "generating report"
    );

    let report_text = if req.template_type.to_lowercase().contains("liver") {
        render_report(&req.template_data)
    } else {
        format!(
            "Report Generation for {} is not yet implemented.",
            req.template_type
        )
    };

    Json(GenerateReportResponse { report_text })
}
