use echo_core::models::record::FormRecord;
use echo_export::narrative::{format_date, list_items, render_report};
use serde_json::json;

fn record(value: serde_json::Value) -> FormRecord {
    serde_json::from_value(value).expect("valid record")
}

#[test]
fn list_items_uses_natural_conjunction() {
    assert_eq!(list_items(&["A", "B", "C"]), "A, B and C");
    assert_eq!(list_items(&["A", "B"]), "A and B");
    assert_eq!(list_items(&["A"]), "A");
    assert_eq!(list_items::<&str>(&[]), "");
}

#[test]
fn dates_render_day_first() {
    assert_eq!(format_date("2025-03-04"), "04/03/2025");
    assert_eq!(format_date("2025-03-04T10:15"), "04/03/2025");
    assert_eq!(format_date("last spring"), "last spring");
    assert_eq!(format_date(""), "");
}

#[test]
fn cirrhosis_only_background_without_lesions() {
    let text = render_report(&record(json!({
        "cirrhosis": "Yes",
        "steatosis": "No",
        "siderosis": "No",
        "observationMode": "non-lesion",
        "aggregate": { "identifier": "" }
    })));
    assert!(text.contains(
        "<strong>Liver Background: </strong>The liver demonstrates morphology consistent with cirrhosis. "
    ));
    assert!(!text.contains("steatosis"));
    assert!(!text.contains("siderosis"));
    assert!(text.contains("<p>No focal liver lesions defined.</p>"));
}

#[test]
fn empty_record_renders_neutral_defaults() {
    let text = render_report(&FormRecord::default());
    assert_eq!(
        text,
        "<p><strong>CLINICAL INFORMATION:</strong> Age unknown-year-old patient. </p>\
         <p><strong>COMPARISON:</strong> None available.</p>\
         <p><strong>TECHNIQUE:</strong> Non-contrast Imaging of the liver.</p>\
         <p><strong>FINDINGS:</strong></p>\
         <p><strong>Liver Background: </strong>Normal hepatic morphology without evidence of cirrhosis, steatosis, or siderosis. </p>\
         <p><strong>IMPRESSION:</strong><br/>No acute findings.</p>"
    );
}

#[test]
fn clinical_information_covers_treatment_history() {
    let text = render_report(&record(json!({
        "age": "61",
        "sex": "Male",
        "etiologyOfLiverDisease": "HCV",
        "rf_hcv": true,
        "rf_prior_hcc": true,
        "rf_hbv": false,
        "anyTreatment": "Yes",
        "treatmentModalityHistory": "TACE",
        "treatmentDates": ["2025-01-05", "2025-04-20"],
        "pathologyDiagnosis": "HCC",
        "pathologyDate": "2024-12-01"
    })));
    assert!(text.contains(
        "<strong>CLINICAL INFORMATION:</strong> 61-year-old male. Etiology of liver disease: HCV. \
         Risk factors: HCV, PRIOR_HCC. Status: Post-treatment. Prior intervention: TACE. \
         Date(s) of treatment: 05/01/2025; 20/04/2025. Pathology: HCC (01/12/2024). "
    ));
}

#[test]
fn comparison_and_technique_phrasing() {
    let text = render_report(&record(json!({
        "comparisonAvailable": "Yes",
        "priorExamModality": "MRI",
        "priorExamDate": "2024-06-30",
        "priorContrastType": "ec",
        "comparisonRemarks": "stable",
        "modality": "CT",
        "studyContrast": "contrast",
        "contrastType": "iodinated",
        "contrastVolume": "90",
        "useSubtraction": "Yes",
        "subtractionPurpose": "arterial enhancement"
    })));
    assert!(text.contains(
        "<p><strong>COMPARISON:</strong> Comparison is made with prior MRI dated 30/06/2024 (ec contrast). Note: stable.</p>"
    ));
    assert!(text.contains(
        "<p><strong>TECHNIQUE:</strong> Multiphasic contrast-enhanced CT of the liver. Contrast agent: iodinated. \
         Volume: 90 ml. Digital subtraction processing applied for evaluation of arterial enhancement.</p>"
    ));
}

#[test]
fn lesion_narratives_compose_present_phrases() {
    let text = render_report(&record(json!({
        "observationMode": "lesion",
        "impressionSummary": "LR-5",
        "examConclusion": "Consistent with HCC.",
        "recommendation": "MDT review.",
        "lesions": [
            {
                "index": 1, "segment": "VII", "size_mm": "21", "size_cm": "2",
                "imageid": "14", "nonrimAPHE": "Yes", "washout": "Yes", "enhCapsule": "Yes",
                "thresholdGrowth": "Yes", "tumorInVein": "Yes",
                "malignancy": "Yes", "malignancySpec": "rim APHE",
                "treated": "Yes", "treatModality": "RFA", "pretLR": "4"
            },
            { "index": 2, "size_cm": "3", "nonrimAPHE": "No", "washout": "No" },
            { "index": 3, "nonrimAPHE": "No" }
        ]
    })));
    assert!(text.contains("<strong>Focal Observations:</strong> 3 lesion(s) identified."));
    assert!(text.contains(
        "<p><u>Observation 1:</u> Segment VII. Max diameter: 21 mm. [Series -, Img 14] \
         <strong>Status: TREATED.</strong> (Modality: RFA). Pre-treatment: LR-4 (? mm). \
         Imaging features: non-rim arterial phase hyperenhancement (APHE), washout appearance and enhancing capsule. \
         Threshold growth is evident. \
         Ancillary features: tumor in vein and features favoring malignancy (rim APHE). </p>"
    ));
    assert!(text.contains(
        "<p><u>Observation 2:</u> Segment ?. Max diameter: 3 cm. No APHE or washout observed. </p>"
    ));
    assert!(text.contains("<p><u>Observation 3:</u> Segment ?. </p>"));
    assert!(text.ends_with(
        "<p><strong>IMPRESSION:</strong><br/>LR-5</p>\
         <p><strong>CONCLUSION:</strong> Consistent with HCC.</p>\
         <p><strong>RECOMMENDATION:</strong> MDT review.</p>"
    ));
}

#[test]
fn aggregate_findings_use_identifier() {
    let text = render_report(&record(json!({
        "observationMode": "non-lesion",
        "aggregate": {
            "identifier": "Infiltrative mass",
            "size_mm": "80",
            "location": "right lobe",
            "imagingFeatures": "ill-defined"
        }
    })));
    assert!(text.contains(
        "<p><strong>Aggregate Findings:</strong> Identifier: \"Infiltrative mass\". \
         Aggregate size: 80 mm. Location: right lobe. Features: ill-defined. </p>"
    ));
    assert!(!text.contains("Focal Observations"));
}

#[test]
fn free_text_is_escaped_and_output_is_deterministic() {
    let r = record(json!({ "extraHepatic": "<script>x</script> & more" }));
    let text = render_report(&r);
    assert!(text.contains("Extra-hepatic findings: &lt;script&gt;x&lt;/script&gt; &amp; more."));
    assert_eq!(text, render_report(&r));
}
