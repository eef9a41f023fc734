mod common;

use common::{apply, complete_ct_state, replay, set, set_lesion};
use echo_core::models::record::FieldValue;
use echo_forms::collect::collect;
use echo_forms::registry::LesionField;
use echo_forms::state::FormEvent;
use echo_forms::variant::{ASSISTED, FormVariant, HiddenValuePolicy};

#[test]
fn lesion_mode_collects_sorted_lesions_without_aggregate() {
    let record = collect(&complete_ct_state());
    assert_eq!(record.lesions.len(), 2);
    assert_eq!(record.lesions[0].index, 1);
    assert_eq!(record.lesions[1].segment, "VII");
    assert!(record.aggregate.is_none());
    assert_eq!(record.text("modality"), "CT");
    assert_eq!(record.text("lesionCount"), "2");
    assert!(!record.fields.contains_key("aggregateIdentifier"));
}

#[test]
fn non_lesion_mode_collects_aggregate_only() {
    let state = apply(&complete_ct_state(), set("observationMode", "non-lesion"));
    let state = apply(&state, set("aggregateIdentifier", "Infiltrative mass"));
    let record = collect(&state);
    assert!(record.lesions.is_empty());
    let aggregate = record.aggregate.expect("aggregate collected");
    assert_eq!(aggregate.identifier, "Infiltrative mass");
    assert_eq!(aggregate.size_mm, "");
}

#[test]
fn checkboxes_collect_as_flags_and_radios_only_when_answered() {
    let state = apply(
        &complete_ct_state(),
        FormEvent::SetChecked {
            key: "rf_hbv".to_string(),
            checked: true,
        },
    );
    let state = apply(&state, set("portalHypertension", ""));
    let record = collect(&state);
    assert_eq!(record.fields.get("rf_hbv"), Some(&FieldValue::Flag(true)));
    assert_eq!(record.fields.get("rf_hcv"), Some(&FieldValue::Flag(false)));
    assert!(!record.fields.contains_key("portalHypertension"));
    assert_eq!(record.text("cirrhosis"), "Yes");
}

#[test]
fn treatment_dates_keep_non_blank_rows_in_order() {
    let state = replay(
        &ASSISTED,
        vec![
            set("anyTreatment", "Yes"),
            FormEvent::SetTreatmentDate {
                row: 0,
                value: "2025-05-01".to_string(),
            },
            FormEvent::AddTreatmentDate {
                value: "   ".to_string(),
            },
            FormEvent::AddTreatmentDate {
                value: " 2024-01-09".to_string(),
            },
        ],
    );
    let record = collect(&state);
    assert_eq!(record.treatment_dates, ["2025-05-01", " 2024-01-09"]);

    let json = serde_json::to_value(collect(&complete_ct_state())).expect("serialize");
    assert!(json.get("treatmentDates").is_none());
}

#[test]
fn hidden_values_never_reach_the_record() {
    let preserving = FormVariant {
        hidden_values: HiddenValuePolicy::Preserve,
        ..ASSISTED
    };
    let state = common::complete_ct_state()
        .apply(&preserving, set_lesion(1, LesionField::Treated, "Yes"))
        .and_then(|s| s.apply(&preserving, set_lesion(1, LesionField::InterimChange, "smaller")))
        .and_then(|s| s.apply(&preserving, set_lesion(1, LesionField::Treated, "No")))
        .and_then(|s| s.apply(&preserving, set("studyContrast", "non-contrast")))
        .expect("events apply");
    assert_eq!(state.lesion(1).map(|l| l.interim_change.as_str()), Some("smaller"));
    assert_eq!(state.value("contrastType"), "iodinated");

    let record = collect(&state);
    assert_eq!(record.lesions[0].interim_change, "");
    assert_eq!(record.text("contrastType"), "");
}

#[test]
fn collecting_is_deterministic() {
    let state = complete_ct_state();
    assert_eq!(collect(&state), collect(&state));
}
