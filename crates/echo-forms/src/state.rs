//! The form state value and its reducer.
//!
//! Every user interaction is a [`FormEvent`]; [`FormState::apply`] returns
//! the next state with all driver effects (block regeneration, date rows,
//! contrast resets, hidden-value clearing) already applied. Visibility,
//! validation and collection are pure functions of the resulting state.

use std::collections::BTreeMap;

use echo_core::models::chat::ExtractedData;
use echo_core::models::record::{FieldValue, LesionObservation, ObservationMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blocks::{generate_blocks, parse_lesion_count};
use crate::error::FormError;
use crate::field::{FieldDef, FieldKind, SectionId};
use crate::prefill;
use crate::registry::{
    ANY_TREATMENT, CONTRAST_TYPE, LESION_COUNT, LesionField, MODALITY, OBSERVATION_MODE,
    PRIOR_CONTRAST_TYPE, PRIOR_EXAM_MODALITY, YES, scalar_field,
};
use crate::variant::{FormVariant, HiddenValuePolicy};
use crate::visibility::{compute_visibility, contrast_options};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    SetField { key: String, value: String },
    SetChecked { key: String, checked: bool },
    /// Raw text of the lesion count input.
    SetLesionCount { raw: String },
    SetLesionField { index: u32, field: LesionField, value: String },
    AddTreatmentDate { value: String },
    SetTreatmentDate { row: usize, value: String },
    RemoveTreatmentDate { row: usize },
    /// Values extracted by the chat assistant. Values the form cannot hold
    /// (e.g. an unknown sex) are skipped.
    Prefill { extracted: ExtractedData },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    values: BTreeMap<String, FieldValue>,
    #[serde(default)]
    treatment_dates: Vec<String>,
    #[serde(default)]
    lesions: Vec<LesionObservation>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state by applying `events` in order to an empty form.
    pub fn replay(
        variant: &FormVariant,
        events: impl IntoIterator<Item = FormEvent>,
    ) -> Result<Self, FormError> {
        events
            .into_iter()
            .try_fold(Self::new(), |state, event| state.apply(variant, event))
    }

    /// Rebuild a posted snapshot by replaying its values through the
    /// reducer, so it obeys the same clamps, choice lists and visibility
    /// rules as a form edited event by event.
    ///
    /// Values are applied in passes until no more of them can be; a value
    /// that never applies fails the rebuild. Under [`HiddenValuePolicy::Preserve`]
    /// values left behind only because their section is hidden are dropped,
    /// since collection never emits them.
    pub fn rebuild(variant: &FormVariant, snapshot: &FormState) -> Result<Self, FormError> {
        let mut pending: Vec<FormEvent> = snapshot
            .values
            .iter()
            .filter_map(|(key, value)| match value {
                FieldValue::Flag(true) => Some(FormEvent::SetChecked {
                    key: key.clone(),
                    checked: true,
                }),
                FieldValue::Text(text) if !text.is_empty() => Some(FormEvent::SetField {
                    key: key.clone(),
                    value: text.clone(),
                }),
                _ => None,
            })
            .collect();
        for lesion in &snapshot.lesions {
            for field in LesionField::ALL {
                let value = field.get(lesion);
                if !value.is_empty() {
                    pending.push(FormEvent::SetLesionField {
                        index: lesion.index,
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }
        for (row, date) in snapshot.treatment_dates.iter().enumerate() {
            pending.push(if row == 0 {
                FormEvent::SetTreatmentDate {
                    row,
                    value: date.clone(),
                }
            } else {
                FormEvent::AddTreatmentDate {
                    value: date.clone(),
                }
            });
        }

        let mut state = Self::new();
        loop {
            let before = pending.len();
            let mut failures = Vec::new();
            for event in std::mem::take(&mut pending) {
                match state.apply(variant, event.clone()) {
                    Ok(next) => state = next,
                    Err(err) => {
                        failures.push(err);
                        pending.push(event);
                    }
                }
            }
            if pending.is_empty() {
                break;
            }
            if pending.len() < before {
                continue;
            }
            let blocking = failures.into_iter().find(|err| {
                variant.hidden_values != HiddenValuePolicy::Preserve
                    || !matches!(err, FormError::HiddenField(_))
            });
            match blocking {
                Some(err) => return Err(err),
                None => break,
            }
        }

        if let Some(lesion) = snapshot.lesions.iter().find(|l| state.lesion(l.index).is_none()) {
            return Err(FormError::NoSuchLesion(lesion.index));
        }
        Ok(state)
    }

    /// Text value of a scalar field; empty when unset.
    pub fn value(&self, key: &str) -> &str {
        self.values
            .get(key)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(FieldValue::is_checked)
    }

    pub fn observation_mode(&self) -> Option<ObservationMode> {
        ObservationMode::from_value(self.value(OBSERVATION_MODE))
    }

    pub fn treatment_dates(&self) -> &[String] {
        &self.treatment_dates
    }

    pub fn lesions(&self) -> &[LesionObservation] {
        &self.lesions
    }

    pub fn lesion(&self, index: u32) -> Option<&LesionObservation> {
        self.lesions.iter().find(|l| l.index == index)
    }

    pub fn apply(&self, variant: &FormVariant, event: FormEvent) -> Result<Self, FormError> {
        let mut next = self.clone();
        match event {
            FormEvent::SetField { key, value } => next.set_field(&key, value)?,
            FormEvent::SetChecked { key, checked } => next.set_checked(&key, checked)?,
            FormEvent::SetLesionCount { raw } => next.set_field(LESION_COUNT, raw)?,
            FormEvent::SetLesionField {
                index,
                field,
                value,
            } => next.set_lesion_field(index, field, &value)?,
            FormEvent::AddTreatmentDate { value } => {
                next.require_shown(SectionId::TreatmentHistory, "treatmentDate")?;
                next.treatment_dates.push(value);
            }
            FormEvent::SetTreatmentDate { row, value } => {
                let slot = next
                    .treatment_dates
                    .get_mut(row)
                    .ok_or(FormError::NoSuchTreatmentDate(row))?;
                *slot = value;
            }
            FormEvent::RemoveTreatmentDate { row } => {
                if row >= next.treatment_dates.len() {
                    return Err(FormError::NoSuchTreatmentDate(row));
                }
                if next.treatment_dates.len() == 1 {
                    return Err(FormError::LastTreatmentDate);
                }
                next.treatment_dates.remove(row);
            }
            FormEvent::Prefill { extracted } => {
                return Ok(prefill::prefill_events(&extracted).into_iter().fold(
                    next,
                    |state, event| match state.apply(variant, event) {
                        Ok(applied) => applied,
                        Err(err) => {
                            debug!(error = %err, "prefill value skipped");
                            state
                        }
                    },
                ));
            }
        }

        if variant.hidden_values == HiddenValuePolicy::ClearOnHide {
            next.clear_hidden();
        }
        Ok(next)
    }

    fn set_field(&mut self, key: &str, value: String) -> Result<(), FormError> {
        let def = scalar_field(key).ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        if def.kind == FieldKind::Checkbox {
            return Err(FormError::CheckboxValue(key.to_string()));
        }
        self.require_shown(def.section, def.key)?;
        // A number input holds nothing for text that is not a number.
        let value = if def.kind == FieldKind::Number && !is_number(&value) {
            String::new()
        } else {
            value
        };
        if !value.is_empty() && !self.accepts(def, &value) {
            return Err(FormError::InvalidChoice {
                key: key.to_string(),
                value,
            });
        }

        let changed = self.value(def.key) != value;
        if value.is_empty() {
            self.values.remove(def.key);
        } else {
            self.values.insert(def.key.to_string(), FieldValue::Text(value));
        }
        if changed {
            self.run_driver_effects(def.key);
        }
        Ok(())
    }

    fn set_checked(&mut self, key: &str, checked: bool) -> Result<(), FormError> {
        let def = scalar_field(key).ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        if def.kind != FieldKind::Checkbox {
            return Err(FormError::NotACheckbox(key.to_string()));
        }
        self.require_shown(def.section, def.key)?;
        if checked {
            self.values.insert(def.key.to_string(), FieldValue::Flag(true));
        } else {
            self.values.remove(def.key);
        }
        Ok(())
    }

    fn set_lesion_field(
        &mut self,
        index: u32,
        field: LesionField,
        value: &str,
    ) -> Result<(), FormError> {
        if self.lesion(index).is_none() {
            return Err(FormError::NoSuchLesion(index));
        }
        if !compute_visibility(self).shows(field.section(index)) {
            return Err(FormError::HiddenField(format!("{}_{index}", field.key())));
        }
        let value = field.sanitize(value);
        let options = field.options();
        if !value.is_empty() && !options.is_empty() && !options.contains(&value.as_str()) {
            return Err(FormError::InvalidChoice {
                key: format!("{}_{index}", field.key()),
                value,
            });
        }
        if let Some(lesion) = self.lesions.iter_mut().find(|l| l.index == index) {
            *field.slot(lesion) = value;
        }
        Ok(())
    }

    /// Whether `value` is one of the choices a select or radio offers right now.
    fn accepts(&self, def: &FieldDef, value: &str) -> bool {
        match def.key {
            CONTRAST_TYPE => contrast_options(self.value(MODALITY))
                .iter()
                .any(|o| o.value == value),
            PRIOR_CONTRAST_TYPE => contrast_options(self.value(PRIOR_EXAM_MODALITY))
                .iter()
                .any(|o| o.value == value),
            _ => def.options.is_empty() || def.options.contains(&value),
        }
    }

    fn require_shown(&self, section: SectionId, key: &str) -> Result<(), FormError> {
        if compute_visibility(self).shows(section) {
            Ok(())
        } else {
            Err(FormError::HiddenField(key.to_string()))
        }
    }

    fn run_driver_effects(&mut self, key: &str) {
        match key {
            MODALITY => self.reset_unavailable_contrast(CONTRAST_TYPE, MODALITY),
            PRIOR_EXAM_MODALITY => {
                self.reset_unavailable_contrast(PRIOR_CONTRAST_TYPE, PRIOR_EXAM_MODALITY)
            }
            ANY_TREATMENT => {
                if self.value(ANY_TREATMENT) == YES {
                    if self.treatment_dates.is_empty() {
                        self.treatment_dates.push(String::new());
                    }
                } else {
                    self.treatment_dates.clear();
                }
            }
            OBSERVATION_MODE | LESION_COUNT => self.regenerate_lesions(),
            _ => {}
        }
    }

    fn reset_unavailable_contrast(&mut self, contrast_key: &str, modality_key: &str) {
        let current = self.value(contrast_key);
        if !contrast_options(self.value(modality_key))
            .iter()
            .any(|o| o.value == current)
        {
            self.values.remove(contrast_key);
        }
    }

    /// Destroy every lesion block and create fresh ones from the count.
    fn regenerate_lesions(&mut self) {
        self.lesions = match self.observation_mode() {
            Some(ObservationMode::Lesion) => parse_lesion_count(self.value(LESION_COUNT))
                .map(generate_blocks)
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        debug!(count = self.lesions.len(), "lesion blocks regenerated");
    }

    fn clear_hidden(&mut self) {
        let visibility = compute_visibility(self);
        self.values.retain(|key, _| {
            scalar_field(key).is_none_or(|def| visibility.shows(def.section))
        });
        if !visibility.shows(SectionId::TreatmentHistory) {
            self.treatment_dates.clear();
        }
        for lesion in &mut self.lesions {
            for field in LesionField::ALL {
                if !visibility.shows(field.section(lesion.index)) {
                    field.slot(lesion).clear();
                }
            }
        }
    }
}

fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}
