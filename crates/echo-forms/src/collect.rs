//! Serializes a form state into the stored record.

use echo_core::models::record::{
    AggregateObservation, FieldValue, FormRecord, LesionObservation, ObservationMode,
};

use crate::field::{FieldKind, SectionId};
use crate::registry::{LesionField, SCALAR_FIELDS};
use crate::state::FormState;
use crate::visibility::compute_visibility;

/// Collect the record for a form state. Values inside hidden sections are
/// emitted empty, so a hidden value never reaches storage regardless of the
/// variant's hidden-value policy.
pub fn collect(state: &FormState) -> FormRecord {
    let visibility = compute_visibility(state);
    let mut record = FormRecord::default();

    for def in SCALAR_FIELDS
        .iter()
        .filter(|def| def.section != SectionId::Aggregate)
    {
        let shown = visibility.shows(def.section);
        match def.kind {
            FieldKind::Checkbox => {
                record.fields.insert(
                    def.key.to_string(),
                    FieldValue::Flag(shown && state.is_checked(def.key)),
                );
            }
            // An unanswered radio group contributes no key.
            FieldKind::Radio => {
                let value = state.value(def.key);
                if shown && !value.is_empty() {
                    record.fields.insert(def.key.to_string(), value.into());
                }
            }
            _ => {
                let value = if shown { state.value(def.key) } else { "" };
                record.fields.insert(def.key.to_string(), value.into());
            }
        }
    }

    if visibility.shows(SectionId::TreatmentHistory) {
        record.treatment_dates = state
            .treatment_dates()
            .iter()
            .filter(|d| !d.trim().is_empty())
            .cloned()
            .collect();
    }

    match state.observation_mode() {
        Some(ObservationMode::Lesion) => {
            let mut lesions: Vec<LesionObservation> = state
                .lesions()
                .iter()
                .map(|lesion| {
                    let mut snapshot = lesion.clone();
                    for field in LesionField::ALL {
                        if !visibility.shows(field.section(lesion.index)) {
                            field.slot(&mut snapshot).clear();
                        }
                    }
                    snapshot
                })
                .collect();
            lesions.sort_by_key(|l| l.index);
            lesions.dedup_by_key(|l| l.index);
            record.lesions = lesions;
        }
        Some(ObservationMode::NonLesion) => {
            record.aggregate = Some(AggregateObservation {
                identifier: state.value("aggregateIdentifier").to_string(),
                size_mm: state.value("aggregateSize").to_string(),
                location: state.value("aggregateLocation").to_string(),
                imaging_features: state.value("aggregateImagingFeatures").to_string(),
                vascular: state.value("aggregateVascular").to_string(),
                biliary: state.value("aggregateBiliary").to_string(),
            });
        }
        None => {}
    }

    record
}
