//! Required-field validation over the currently shown controls.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::field::{FieldKind, FieldRef, SectionId};
use crate::registry::{IDENTITY_FIELDS, LesionField, SCALAR_FIELDS};
use crate::state::FormState;
use crate::visibility::{Visibility, compute_visibility};

/// Every shown, required control that has no value.
pub fn validate(state: &FormState) -> BTreeSet<FieldRef> {
    let visibility = compute_visibility(state);
    let mut missing = unanswered_groups(state, &visibility);
    missing.extend(empty_controls(state, &visibility));
    missing
}

fn is_required(key: &str, kind: FieldKind, optional: bool) -> bool {
    !optional && kind != FieldKind::Hidden && !IDENTITY_FIELDS.contains(&key)
}

/// Radio groups count as a single field, missing when nothing is selected.
fn unanswered_groups(state: &FormState, visibility: &Visibility) -> BTreeSet<FieldRef> {
    let scalars = SCALAR_FIELDS
        .iter()
        .filter(|def| def.kind == FieldKind::Radio)
        .filter(|def| is_required(def.key, def.kind, def.optional))
        .filter(|def| visibility.shows(def.section))
        .filter(|def| state.value(def.key).is_empty())
        .map(|def| FieldRef::Scalar(def.key));

    let lesions = state.lesions().iter().flat_map(|lesion| {
        LesionField::ALL
            .into_iter()
            .filter(|f| f.kind() == FieldKind::Radio && !f.optional())
            .filter(|f| visibility.shows(f.section(lesion.index)))
            .filter(|f| f.get(lesion).is_empty())
            .map(|field| FieldRef::Lesion {
                index: lesion.index,
                field,
            })
    });

    scalars.chain(lesions).collect()
}

/// Text, number, date and select controls, missing when their value is empty.
fn empty_controls(state: &FormState, visibility: &Visibility) -> BTreeSet<FieldRef> {
    let mut missing: BTreeSet<FieldRef> = SCALAR_FIELDS
        .iter()
        .filter(|def| def.kind.is_value_control())
        .filter(|def| is_required(def.key, def.kind, def.optional))
        .filter(|def| visibility.shows(def.section))
        .filter(|def| state.value(def.key).is_empty())
        .map(|def| FieldRef::Scalar(def.key))
        .collect();

    if visibility.shows(SectionId::TreatmentHistory) {
        missing.extend(
            state
                .treatment_dates()
                .iter()
                .enumerate()
                .filter(|(_, date)| date.is_empty())
                .map(|(row, _)| FieldRef::TreatmentDate(row)),
        );
    }

    for lesion in state.lesions() {
        missing.extend(
            LesionField::ALL
                .into_iter()
                .filter(|f| f.kind().is_value_control() && !f.optional())
                .filter(|f| visibility.shows(f.section(lesion.index)))
                .filter(|f| f.get(lesion).is_empty())
                .map(|field| FieldRef::Lesion {
                    index: lesion.index,
                    field,
                }),
        );
    }
    missing
}

/// Highlight changes after a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlights {
    /// Every field currently missing.
    pub mark: BTreeSet<FieldRef>,
    /// Previously highlighted fields that are now filled.
    pub unmark: BTreeSet<FieldRef>,
}

pub fn reconcile_highlights(
    previous: &BTreeSet<FieldRef>,
    missing: &BTreeSet<FieldRef>,
) -> Highlights {
    Highlights {
        mark: missing.clone(),
        unmark: previous.difference(missing).copied().collect(),
    }
}
