use echo_core::models::record::FormRecord;
use echo_core::models::report::{ReportDocument, ReportStatus};
use echo_export::docx::{Inline, generate_docx, paragraphs, parse_inline};
use echo_export::narrative::render_report;
use echo_export::render::{EMPTY_VALUE, StandardReport, render_standard_report};
use echo_export::styles::DocumentStyles;
use serde_json::json;

fn document() -> ReportDocument {
    let template_data: FormRecord = serde_json::from_value(json!({
        "patientName": "Jane <Doe>",
        "age": "56",
        "modality": "CT",
        "reportDate": "2026-10-19T09:30",
        "reportId": "RA000001",
        "cirrhosis": "Yes",
        "createdBy": "Dr. Le"
    }))
    .expect("valid record");
    ReportDocument {
        report_id: "RA000001".to_string(),
        patient_id: "P-JAN1970".to_string(),
        chat_session_id: None,
        template_type: "CT_MR_LIVER".to_string(),
        status: ReportStatus::Draft,
        template_data,
        generated_report: None,
        created_at: jiff::Timestamp::UNIX_EPOCH,
        updated_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

#[test]
fn metadata_uses_placeholder_and_space_separated_date() {
    let doc = document();
    let report = StandardReport::new(&doc, &render_report(&doc.template_data));
    assert_eq!(report.title, "CT Liver Report");
    let value = |label: &str| {
        report
            .metadata
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.clone())
    };
    assert_eq!(value("Report date").as_deref(), Some("2026-10-19 09:30"));
    assert_eq!(value("Sex").as_deref(), Some(EMPTY_VALUE));
    assert_eq!(report.approved_by, EMPTY_VALUE);
}

#[test]
fn standard_page_escapes_metadata_but_not_narrative() {
    let doc = document();
    let report = StandardReport::new(&doc, &render_report(&doc.template_data));
    let html = render_standard_report(&report).expect("page renders");
    assert!(html.contains("Jane &lt;Doe&gt;"));
    assert!(html.contains("<strong>FINDINGS:</strong>"));
    assert!(html.contains("<h1>CT Liver Report</h1>"));
}

#[test]
fn inline_markup_becomes_formatted_segments() {
    let body = "<p><strong>IMPRESSION:</strong><br/>A &amp; B</p><p><u>Observation 1:</u> Segment I.</p>";
    let paras = paragraphs(body);
    assert_eq!(paras.len(), 2);
    assert_eq!(
        parse_inline(paras[0]),
        vec![
            Inline::Text {
                text: "IMPRESSION:".to_string(),
                bold: true,
                underline: false,
            },
            Inline::Break,
            Inline::Text {
                text: "A & B".to_string(),
                bold: false,
                underline: false,
            },
        ]
    );
    assert!(matches!(
        &parse_inline(paras[1])[0],
        Inline::Text { underline: true, .. }
    ));
}

#[test]
fn docx_is_a_zip_package() {
    let doc = document();
    let report = StandardReport::new(&doc, &render_report(&doc.template_data));
    let bytes = generate_docx(&report, &DocumentStyles::default()).expect("docx builds");
    assert!(bytes.starts_with(b"PK"));
}
