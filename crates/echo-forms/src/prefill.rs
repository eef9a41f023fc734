//! Mapping chat-extracted details onto form events.

use echo_core::models::chat::ExtractedData;
use echo_core::models::patient::derive_patient_id;
use jiff::civil::DateTime;

use crate::registry::{AGE, DOB, MODALITY, PATIENT_ID, PATIENT_NAME, REPORT_DATE, SEX};
use crate::state::{FormEvent, FormState};
use crate::variant::FormVariant;

/// `examType` mentioning CT maps to CT, otherwise MRI when it mentions MRI.
pub fn modality_for_exam(exam_type: &str) -> Option<&'static str> {
    let exam = exam_type.to_lowercase();
    if exam.contains("ct") {
        Some("CT")
    } else if exam.contains("mri") {
        Some("MRI")
    } else {
        None
    }
}

/// Upper-case the first letter and lower-case the rest ("FEMALE" -> "Female").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn set(key: &str, value: String) -> FormEvent {
    FormEvent::SetField {
        key: key.to_string(),
        value,
    }
}

/// Events that copy non-empty extracted values into their form fields.
pub fn prefill_events(extracted: &ExtractedData) -> Vec<FormEvent> {
    let present = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut events = Vec::new();
    if let Some(name) = present(&extracted.patient_name) {
        events.push(set(PATIENT_NAME, name));
    }
    if let Some(age) = present(&extracted.age) {
        events.push(set(AGE, age));
    }
    if let Some(gender) = present(&extracted.gender) {
        events.push(set(SEX, capitalize(&gender)));
    }
    if let Some(dob) = present(&extracted.dob) {
        events.push(set(DOB, dob));
    }
    if let Some(modality) = extracted.exam_type.as_deref().and_then(modality_for_exam) {
        events.push(set(MODALITY, modality.to_string()));
    }
    events
}

/// Patient ID derived from name and birth year when the field is still
/// empty. Falls back to the variant's placeholder when there is no name.
pub fn patient_id_event(
    state: &FormState,
    variant: &FormVariant,
    current_year: i16,
) -> Option<FormEvent> {
    if !state.value(PATIENT_ID).is_empty() {
        return None;
    }
    let id = derive_patient_id(state.value(PATIENT_NAME), state.value(DOB), current_year)
        .or_else(|| variant.patient_id_fallback.map(str::to_string))?;
    Some(set(PATIENT_ID, id))
}

/// Default report date in `datetime-local` form (`YYYY-MM-DDTHH:MM`).
pub fn report_date_event(now: DateTime) -> FormEvent {
    set(REPORT_DATE, now.strftime("%Y-%m-%dT%H:%M").to_string())
}
