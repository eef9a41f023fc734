use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, warn};

use echo_core::models::record::FormRecord;
use echo_core::models::report::ReportDocument;

use crate::error::ExportError;

const STANDARD_REPORT: &str = include_str!("../templates/standard_report.html");
const STANDARD_REPORT_NAME: &str = "standard_report.html";

/// Placeholder shown for empty metadata values.
pub const EMPTY_VALUE: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything the standard report page shows.
#[derive(Debug, Clone, Serialize)]
pub struct StandardReport {
    pub title: String,
    pub subject: String,
    pub metadata: Vec<MetadataRow>,
    pub body: String,
    pub created_by: String,
    pub approved_by: String,
}

fn display(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        value.to_string()
    }
}

pub fn report_title(record: &FormRecord) -> String {
    match record.non_empty("modality") {
        Some(modality) => format!("{modality} Liver Report"),
        None => "Liver Report".to_string(),
    }
}

impl StandardReport {
    /// Page model for a saved report. `body` is the narrative HTML.
    pub fn new(document: &ReportDocument, body: &str) -> Self {
        let t = &document.template_data;
        let row = |label, key: &str| MetadataRow {
            label,
            value: display(t.text(key)),
        };
        let metadata = vec![
            row("Patient name", "patientName"),
            row("Age", "age"),
            row("Sex", "sex"),
            row("Date of birth", "dob"),
            row("Patient ID", "patientId"),
            row("Report ID", "reportId"),
            row("Institution", "institution"),
            row("Referring physician", "referrer"),
            MetadataRow {
                label: "Report date",
                value: display(&t.text("reportDate").replace('T', " ")),
            },
            row("Modality", "modality"),
            row("Study", "studyContrast"),
            row("Contrast agent", "contrastType"),
            row("Contrast volume", "contrastVolume"),
        ];

        Self {
            title: report_title(t),
            subject: t.non_empty("patientName").unwrap_or("Patient").to_string(),
            metadata,
            body: body.to_string(),
            created_by: display(t.text("createdBy")),
            approved_by: display(t.text("approvedBy")),
        }
    }
}

/// Render the standard report page with Tera.
pub fn render_standard_report(report: &StandardReport) -> Result<String, ExportError> {
    render_template(STANDARD_REPORT_NAME, STANDARD_REPORT, report)
}

/// Render a Tera template with any serializable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context).inspect_err(|e| {
        warn!(template = template_name, error = %e, "template render failed");
    })?;
    debug!(template = template_name, len = rendered.len(), "template rendered");
    Ok(rendered)
}
