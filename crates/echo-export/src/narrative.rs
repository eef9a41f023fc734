//! Dictation-style narrative text for CT/MR liver records.
//!
//! The output is a sequence of HTML `<p>` paragraphs. Every branch has a
//! neutral fallback, so any record renders. Free-text values are escaped.

use echo_core::models::record::{FormRecord, LesionObservation, ObservationMode};
use jiff::civil::{Date, DateTime};
use tracing::debug;

/// Join items as natural language: `a`, `a and b`, `a, b and c`.
pub fn list_items<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// `YYYY-MM-DD` (optionally with a time) as `DD/MM/YYYY`; anything
/// unparseable is returned unchanged.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = value
        .parse::<Date>()
        .ok()
        .or_else(|| value.parse::<DateTime>().ok().map(|dt| dt.date()));
    match date {
        Some(date) => date.strftime("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped, trimmed value of a record field; `None` when blank.
fn field(record: &FormRecord, key: &str) -> Option<String> {
    record.non_empty(key).map(escape_html)
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| escape_html(value))
}

fn add_para(text: &mut String, content: &str) {
    if !content.trim().is_empty() {
        text.push_str("<p>");
        text.push_str(content);
        text.push_str("</p>");
    }
}

/// Render the full report for a record.
pub fn render_report(record: &FormRecord) -> String {
    let mut text = String::new();
    add_para(&mut text, &clinical_information(record));
    add_para(&mut text, &comparison(record));
    add_para(&mut text, &technique(record));

    text.push_str("<p><strong>FINDINGS:</strong></p>");
    add_para(&mut text, &liver_background(record));
    focal_findings(record, &mut text);

    let impression = field(record, "impressionSummary").unwrap_or_else(|| "No acute findings.".into());
    add_para(&mut text, &format!("<strong>IMPRESSION:</strong><br/>{impression}"));
    if let Some(conclusion) = field(record, "examConclusion") {
        add_para(&mut text, &format!("<strong>CONCLUSION:</strong> {conclusion}"));
    }
    if let Some(recommendation) = field(record, "recommendation") {
        add_para(&mut text, &format!("<strong>RECOMMENDATION:</strong> {recommendation}"));
    }
    debug!(lesions = record.lesions.len(), len = text.len(), "narrative rendered");
    text
}

fn clinical_information(record: &FormRecord) -> String {
    let mut clinical = String::from("<strong>CLINICAL INFORMATION:</strong> ");

    let age = field(record, "age").unwrap_or_else(|| "Age unknown".into());
    let sex = field(record, "sex").unwrap_or_else(|| "patient".into());
    clinical.push_str(&format!("{age}-year-old {}. ", sex.to_lowercase()));

    if let Some(etiology) = field(record, "etiologyOfLiverDisease") {
        clinical.push_str(&format!("Etiology of liver disease: {etiology}. "));
    }

    let risks: Vec<String> = record
        .checked_with_prefix("rf_")
        .map(|key| key.trim_start_matches("rf_").to_uppercase())
        .collect();
    if !risks.is_empty() {
        clinical.push_str(&format!("Risk factors: {}. ", risks.join(", ")));
    }

    if record.is_yes("anyTreatment") {
        clinical.push_str("Status: Post-treatment. ");
        if let Some(modality) = field(record, "treatmentModalityHistory") {
            clinical.push_str(&format!("Prior intervention: {modality}. "));
        }
        if !record.treatment_dates.is_empty() {
            let dates: Vec<String> = record
                .treatment_dates
                .iter()
                .map(|d| escape_html(&format_date(d)))
                .collect();
            clinical.push_str(&format!("Date(s) of treatment: {}. ", dates.join("; ")));
        }
        if let Some(pathology) = field(record, "pathologyDiagnosis") {
            clinical.push_str(&format!("Pathology: {pathology}"));
            if let Some(date) = record.non_empty("pathologyDate") {
                clinical.push_str(&format!(" ({})", escape_html(&format_date(date))));
            }
            clinical.push_str(". ");
        }
    }
    clinical
}

fn comparison(record: &FormRecord) -> String {
    if !record.is_yes("comparisonAvailable") {
        return "<strong>COMPARISON:</strong> None available.".to_string();
    }
    let prior = field(record, "priorExamModality").unwrap_or_else(|| "study".into());
    let dated = record
        .non_empty("priorExamDate")
        .map(|d| format!(" dated {}", escape_html(&format_date(d))))
        .unwrap_or_default();

    let mut comp = format!("<strong>COMPARISON:</strong> Comparison is made with prior {prior}{dated}");
    if let Some(contrast) = field(record, "priorContrastType") {
        comp.push_str(&format!(" ({contrast} contrast)"));
    }
    if let Some(remarks) = field(record, "comparisonRemarks") {
        comp.push_str(&format!(". Note: {remarks}"));
    }
    comp.push('.');
    comp
}

fn technique(record: &FormRecord) -> String {
    let mut procedure = String::from("<strong>TECHNIQUE:</strong> ");
    let modality = field(record, "modality").unwrap_or_else(|| "Imaging".into());

    if record.text("studyContrast") == "contrast" {
        procedure.push_str(&format!("Multiphasic contrast-enhanced {modality} of the liver. "));
        if let Some(agent) = field(record, "contrastType") {
            procedure.push_str(&format!("Contrast agent: {agent}. "));
        }
        if let Some(volume) = field(record, "contrastVolume") {
            procedure.push_str(&format!("Volume: {volume} ml. "));
        }
        if record.is_yes("useSubtraction") {
            procedure.push_str("Digital subtraction processing applied");
            if let Some(purpose) = field(record, "subtractionPurpose") {
                procedure.push_str(&format!(" for evaluation of {purpose}"));
            }
            procedure.push('.');
        }
    } else {
        procedure.push_str(&format!("Non-contrast {modality} of the liver."));
    }
    procedure
}

fn liver_background(record: &FormRecord) -> String {
    let mut background = String::from("<strong>Liver Background: </strong>");

    let mut features = Vec::new();
    if record.is_yes("cirrhosis") {
        features.push("morphology consistent with cirrhosis");
    }
    if record.is_yes("steatosis") {
        features.push("hepatic steatosis");
    }
    if record.is_yes("siderosis") {
        features.push("features of siderosis");
    }

    if features.is_empty() {
        background.push_str(
            "Normal hepatic morphology without evidence of cirrhosis, steatosis, or siderosis. ",
        );
    } else {
        background.push_str(&format!("The liver demonstrates {}. ", list_items(&features)));
    }
    if record.is_yes("portalHypertension") {
        background.push_str("Signs of portal hypertension are present. ");
    }
    if let Some(extra) = field(record, "extraHepatic") {
        background.push_str(&format!("Extra-hepatic findings: {extra}."));
    }
    background
}

fn focal_findings(record: &FormRecord, text: &mut String) {
    match record.observation_mode() {
        Some(ObservationMode::Lesion) if !record.lesions.is_empty() => {
            add_para(
                text,
                &format!(
                    "<strong>Focal Observations:</strong> {} lesion(s) identified.",
                    record.lesions.len()
                ),
            );
            for (position, lesion) in record.lesions.iter().enumerate() {
                add_para(text, &lesion_narrative(position + 1, lesion));
            }
        }
        Some(ObservationMode::NonLesion) => add_para(text, &aggregate_narrative(record)),
        _ => {}
    }
}

fn lesion_narrative(number: usize, lesion: &LesionObservation) -> String {
    let mut l = format!("<u>Observation {number}:</u> ");

    let segment = present(&lesion.segment).unwrap_or_else(|| "?".into());
    l.push_str(&format!("Segment {segment}. "));
    if let Some(mm) = present(&lesion.size_mm) {
        l.push_str(&format!("Max diameter: {mm} mm. "));
    } else if let Some(cm) = present(&lesion.size_cm) {
        l.push_str(&format!("Max diameter: {cm} cm. "));
    }

    let image = present(&lesion.imageid);
    let series = present(&lesion.series_number);
    if image.is_some() || series.is_some() {
        l.push_str(&format!(
            "[Series {}, Img {}] ",
            series.as_deref().unwrap_or("-"),
            image.as_deref().unwrap_or("-")
        ));
    }

    if lesion.treated == "Yes" {
        l.push_str("<strong>Status: TREATED.</strong> ");
        if let Some(modality) = present(&lesion.treatment_modality) {
            l.push_str(&format!("(Modality: {modality}). "));
        }
        if let Some(size) = present(&lesion.equivocal_size) {
            l.push_str(&format!("Viable tumor size: {size} mm. "));
        }
        if let Some(category) = present(&lesion.pretreatment_lr) {
            let size = present(&lesion.pretreatment_size).unwrap_or_else(|| "?".into());
            l.push_str(&format!("Pre-treatment: LR-{category} ({size} mm). "));
        }
        if let Some(change) = present(&lesion.interim_change) {
            l.push_str(&format!("Interval change: {change}. "));
        }
    }

    let mut vascular = Vec::new();
    if lesion.nonrim_aphe == "Yes" {
        vascular.push("non-rim arterial phase hyperenhancement (APHE)");
    }
    if lesion.washout == "Yes" {
        vascular.push("washout appearance");
    }
    if lesion.enhancing_capsule == "Yes" {
        vascular.push("enhancing capsule");
    }
    if !vascular.is_empty() {
        l.push_str(&format!("Imaging features: {}. ", list_items(&vascular)));
    } else if lesion.nonrim_aphe == "No" && lesion.washout == "No" {
        l.push_str("No APHE or washout observed. ");
    }

    if lesion.threshold_growth == "Yes" {
        l.push_str("Threshold growth is evident. ");
    }
    if let Some(features) = present(&lesion.lr_m_features) {
        l.push_str(&format!("LR-M features: {features}. "));
    }
    if let Some(etiology) = present(&lesion.lr_m_etiology) {
        l.push_str(&format!("Suspected etiology: {etiology}. "));
    }

    let mut ancillary = Vec::new();
    if lesion.tumor_in_vein == "Yes" {
        ancillary.push("tumor in vein".to_string());
    }
    for (select, spec, label) in [
        (&lesion.benignity, &lesion.benignity_spec, "benignity"),
        (&lesion.malignancy, &lesion.malignancy_spec, "malignancy"),
        (&lesion.hcc, &lesion.hcc_spec, "HCC"),
    ] {
        if select == "Yes" {
            ancillary.push(format!("features favoring {label} ({})", escape_html(spec.trim())));
        }
    }
    if !ancillary.is_empty() {
        l.push_str(&format!("Ancillary features: {}. ", list_items(&ancillary)));
    }
    if let Some(other) = present(&lesion.ancillary_other) {
        l.push_str(&format!("Additional features: {other}. "));
    }
    l
}

fn aggregate_narrative(record: &FormRecord) -> String {
    let aggregate = record.aggregate.clone().unwrap_or_default();
    let pick = |flat: &str, nested: &str| field(record, flat).or_else(|| present(nested));

    let Some(identifier) = pick("aggregateIdentifier", &aggregate.identifier) else {
        return "No focal liver lesions defined.".to_string();
    };
    let mut text = format!("<strong>Aggregate Findings:</strong> Identifier: \"{identifier}\". ");
    if let Some(size) = pick("aggregateSize", &aggregate.size_mm) {
        text.push_str(&format!("Aggregate size: {size} mm. "));
    }
    if let Some(location) = pick("aggregateLocation", &aggregate.location) {
        text.push_str(&format!("Location: {location}. "));
    }
    if let Some(features) = pick("aggregateImagingFeatures", &aggregate.imaging_features) {
        text.push_str(&format!("Features: {features}. "));
    }
    text
}
