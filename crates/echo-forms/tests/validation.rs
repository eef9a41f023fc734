mod common;

use std::collections::BTreeSet;

use common::{apply, complete_ct_events, complete_ct_state, replay, set, set_lesion};
use echo_forms::field::FieldRef;
use echo_forms::registry::LesionField;
use echo_forms::state::{FormEvent, FormState};
use echo_forms::validation::{reconcile_highlights, validate};
use echo_forms::variant::ASSISTED;

fn keys(missing: &BTreeSet<FieldRef>) -> Vec<String> {
    missing.iter().map(ToString::to_string).collect()
}

#[test]
fn complete_form_has_nothing_missing() {
    assert!(validate(&complete_ct_state()).is_empty());
}

#[test]
fn removing_any_required_value_reports_it() {
    let full = complete_ct_state();
    for key in ["patientName", "referrer", "reportDate", "contrastVolume", "etiologyOfLiverDisease", "createdBy"] {
        let state = apply(&full, set(key, ""));
        assert_eq!(keys(&validate(&state)), vec![key.to_string()], "{key}");
    }

    let state = apply(&full, set_lesion(2, LesionField::LrMEtiology, ""));
    assert_eq!(keys(&validate(&state)), vec!["lrMetiology_2"]);
}

#[test]
fn ct_contrast_scenario_flags_and_clears_segment() {
    let events: Vec<FormEvent> = complete_ct_events()
        .into_iter()
        .filter(|e| {
            !matches!(
                e,
                FormEvent::SetLesionField {
                    index: 1,
                    field: LesionField::Segment,
                    ..
                }
            )
        })
        .collect();
    let state = replay(&ASSISTED, events);
    assert_eq!(state.lesions().len(), 2);
    assert_eq!(state.value("contrastType"), "iodinated");

    let missing = validate(&state);
    assert!(missing.contains(&FieldRef::Lesion {
        index: 1,
        field: LesionField::Segment,
    }));
    assert_eq!(keys(&missing), vec!["segment_1"]);

    let filled = apply(&state, set_lesion(1, LesionField::Segment, "VI"));
    assert!(!keys(&validate(&filled)).contains(&"segment_1".to_string()));
}

#[test]
fn unanswered_radio_group_is_one_field() {
    let state = apply(&complete_ct_state(), set("steatosis", ""));
    assert_eq!(keys(&validate(&state)), vec!["steatosis"]);
}

#[test]
fn optional_identity_and_checkbox_fields_are_never_missing() {
    let missing = keys(&validate(&FormState::new()));
    for key in ["reportId", "patientId", "extraHepatic", "comparisonRemarks", "examConclusion", "approvedBy", "rf_hbv"] {
        assert!(!missing.contains(&key.to_string()), "{key}");
    }
    // Hidden sections contribute nothing.
    assert!(!missing.contains(&"contrastType".to_string()));
    assert!(!missing.contains(&"lesionCount".to_string()));
    assert!(missing.contains(&"observationMode".to_string()));
    assert!(missing.contains(&"modality".to_string()));
}

#[test]
fn shown_detail_blocks_become_required() {
    let state = apply(&complete_ct_state(), set("anyTreatment", "Yes"));
    let missing = keys(&validate(&state));
    assert!(missing.contains(&"treatmentModalityHistory".to_string()));
    assert!(missing.contains(&"pathologyDiagnosis".to_string()));
    assert!(missing.contains(&"treatmentDate_1".to_string()));

    let state = apply(&complete_ct_state(), set_lesion(1, LesionField::Hcc, "Yes"));
    assert_eq!(keys(&validate(&state)), vec!["hccSpec_1"]);

    let state = apply(&complete_ct_state(), set_lesion(2, LesionField::Treated, "Yes"));
    assert_eq!(
        keys(&validate(&state)),
        vec!["equivSize_2", "pretLR_2", "pretSize_2", "treatModality_2", "interimChange_2"]
    );
}

#[test]
fn lesion_mode_without_count_requires_count() {
    let state = apply(&complete_ct_state(), FormEvent::SetLesionCount { raw: String::new() });
    assert!(state.lesions().is_empty());
    assert_eq!(keys(&validate(&state)), vec!["lesionCount"]);
}

#[test]
fn non_numeric_number_input_reads_as_missing() {
    let state = apply(&complete_ct_state(), FormEvent::SetLesionCount { raw: "abc".to_string() });
    let state = apply(&state, set("age", "fifty-six"));
    assert_eq!(state.value("lesionCount"), "");
    assert_eq!(state.value("age"), "");
    assert!(state.lesions().is_empty());
    assert_eq!(keys(&validate(&state)), vec!["age", "lesionCount"]);

    let state = apply(&state, set("age", "56.5"));
    assert_eq!(state.value("age"), "56.5");
}

#[test]
fn highlights_mark_missing_and_unmark_filled() {
    let previous = BTreeSet::from([FieldRef::Scalar("referrer"), FieldRef::Scalar("age")]);
    let missing = BTreeSet::from([FieldRef::Scalar("age"), FieldRef::Scalar("sex")]);
    let highlights = reconcile_highlights(&previous, &missing);
    assert_eq!(highlights.mark, missing);
    assert_eq!(highlights.unmark, BTreeSet::from([FieldRef::Scalar("referrer")]));

    let cleared = reconcile_highlights(&missing, &BTreeSet::new());
    assert!(cleared.mark.is_empty());
    assert_eq!(cleared.unmark, missing);
}
