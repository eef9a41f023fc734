use echo_core::collections;
use echo_core::ids::IdKind;
use echo_core::models::report::ReportStatus;
use serde::Serialize;

/// What happens to values inside a section when it becomes hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenValuePolicy {
    /// Hidden values are erased as soon as their section hides.
    ClearOnHide,
    /// Hidden values stay in the state but are never collected.
    Preserve,
}

/// Describes how one entry form built on the shared liver registry is
/// identified, stored and prefilled.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormVariant {
    pub id: &'static str,
    pub name: &'static str,
    pub template_type: &'static str,
    pub report_id_kind: IdKind,
    pub report_collection: &'static str,
    pub chat_prefill: bool,
    pub writes_patient: bool,
    pub initial_status: ReportStatus,
    pub hidden_values: HiddenValuePolicy,
    /// Patient ID used when none can be derived from the name.
    pub patient_id_fallback: Option<&'static str>,
}

pub const ASSISTED: FormVariant = FormVariant {
    id: "ct_mr_liver_ai",
    name: "CT/MRI Liver (chat-assisted)",
    template_type: "CT_MR_LIVER",
    report_id_kind: IdKind::Report,
    report_collection: collections::REPORTS,
    chat_prefill: true,
    writes_patient: true,
    initial_status: ReportStatus::Draft,
    hidden_values: HiddenValuePolicy::ClearOnHide,
    patient_id_fallback: Some("Unknown"),
};

pub const MANUAL: FormVariant = FormVariant {
    id: "ct_mr_liver_manual",
    name: "CT/MRI Liver (manual entry)",
    template_type: "CT_MR_LIVER_MANUAL",
    report_id_kind: IdKind::ManualReport,
    report_collection: collections::REPORTS_MANUAL,
    chat_prefill: false,
    writes_patient: false,
    initial_status: ReportStatus::Completed,
    hidden_values: HiddenValuePolicy::ClearOnHide,
    patient_id_fallback: None,
};
