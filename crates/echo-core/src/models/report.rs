use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::record::FormRecord;

/// A persisted report: the collected form record plus, once generated,
/// the rendered narrative.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportDocument {
    pub report_id: String,
    pub patient_id: String,
    /// Chat session the report was prefilled from, if any.
    #[serde(rename = "chatDocId", default)]
    pub chat_session_id: Option<String>,
    pub template_type: String,
    pub status: ReportStatus,
    #[ts(type = "Record<string, unknown>")]
    pub template_data: FormRecord,
    #[serde(default)]
    pub generated_report: Option<GeneratedReport>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl ReportDocument {
    pub fn generated_text(&self) -> Option<&str> {
        self.generated_report
            .as_ref()
            .map(|g| g.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedReport {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportStatus {
    Draft,
    Completed,
}
