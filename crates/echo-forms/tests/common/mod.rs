#![allow(dead_code)]

use echo_forms::registry::LesionField;
use echo_forms::state::{FormEvent, FormState};
use echo_forms::variant::{ASSISTED, FormVariant};

pub fn set(key: &str, value: &str) -> FormEvent {
    FormEvent::SetField {
        key: key.to_string(),
        value: value.to_string(),
    }
}

pub fn set_lesion(index: u32, field: LesionField, value: &str) -> FormEvent {
    FormEvent::SetLesionField {
        index,
        field,
        value: value.to_string(),
    }
}

/// Events answering every required lesion control for block `index`.
pub fn lesion_events(index: u32) -> Vec<FormEvent> {
    vec![
        set_lesion(index, LesionField::Segment, "VII"),
        set_lesion(index, LesionField::SizeCm, "2"),
        set_lesion(index, LesionField::SizeMm, "21"),
        set_lesion(index, LesionField::ImageId, "14"),
        set_lesion(index, LesionField::SeriesNumber, "5"),
        set_lesion(index, LesionField::TumorInVein, "No"),
        set_lesion(index, LesionField::LrMFeatures, "none"),
        set_lesion(index, LesionField::LrMEtiology, "none"),
        set_lesion(index, LesionField::NonrimAphe, "Yes"),
        set_lesion(index, LesionField::Washout, "Yes"),
        set_lesion(index, LesionField::EnhancingCapsule, "No"),
        set_lesion(index, LesionField::ThresholdGrowth, "N/A"),
        set_lesion(index, LesionField::Benignity, "None"),
        set_lesion(index, LesionField::Malignancy, "None"),
        set_lesion(index, LesionField::Hcc, "None"),
        set_lesion(index, LesionField::Treated, "No"),
    ]
}

/// A contrast CT with two fully described lesions, nothing left blank.
pub fn complete_ct_events() -> Vec<FormEvent> {
    let mut events = vec![
        set("patientName", "Jane Doe"),
        set("dob", "1970-02-03"),
        set("age", "56"),
        set("sex", "Female"),
        set("referrer", "Dr. Nguyen"),
        set("institution", "City Hospital"),
        set("reportDate", "2026-10-19T09:30"),
        set("modality", "CT"),
        set("studyContrast", "contrast"),
        set("contrastType", "iodinated"),
        set("contrastVolume", "90"),
        set("useSubtraction", "No"),
        set("etiologyOfLiverDisease", "HBV"),
        set("anyTreatment", "No"),
        set("comparisonAvailable", "No"),
        set("cirrhosis", "Yes"),
        set("steatosis", "No"),
        set("siderosis", "No"),
        set("portalHypertension", "No"),
        set("observationMode", "lesion"),
        FormEvent::SetLesionCount {
            raw: "2".to_string(),
        },
    ];
    events.extend(lesion_events(1));
    events.extend(lesion_events(2));
    events.extend([
        set("impressionSummary", "LR-5 observation in segment VII."),
        set("recommendation", "MDT discussion."),
        set("createdBy", "Dr. Le"),
    ]);
    events
}

pub fn replay(variant: &FormVariant, events: Vec<FormEvent>) -> FormState {
    FormState::replay(variant, events).expect("events apply cleanly")
}

pub fn complete_ct_state() -> FormState {
    replay(&ASSISTED, complete_ct_events())
}

pub fn apply(state: &FormState, event: FormEvent) -> FormState {
    state.apply(&ASSISTED, event).expect("event applies")
}
