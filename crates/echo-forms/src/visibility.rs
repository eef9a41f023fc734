//! Which sections of a form are shown for a given state.

use std::collections::BTreeSet;

use echo_core::models::record::ObservationMode;
use serde::Serialize;

use crate::field::{ChoiceOption, SectionId};
use crate::registry::{
    ANY_TREATMENT, COMPARISON_AVAILABLE, LesionField, MODALITY, PRIOR_EXAM_MODALITY,
    STUDY_CONTRAST_KEY, USE_SUBTRACTION, YES,
};
use crate::state::FormState;

const PLACEHOLDER: ChoiceOption = ChoiceOption {
    value: "",
    label: "—",
};

pub static CT_CONTRAST: &[ChoiceOption] = &[
    PLACEHOLDER,
    ChoiceOption {
        value: "iodinated",
        label: "Iodinated (CT)",
    },
    ChoiceOption {
        value: "other",
        label: "Other",
    },
];

pub static MRI_CONTRAST: &[ChoiceOption] = &[
    PLACEHOLDER,
    ChoiceOption {
        value: "ec",
        label: "Extracellular (MRI)",
    },
    ChoiceOption {
        value: "hepatobiliary",
        label: "Hepatobiliary agent (MRI)",
    },
    ChoiceOption {
        value: "other",
        label: "Other",
    },
];

pub static NO_CONTRAST: &[ChoiceOption] = &[PLACEHOLDER];

/// Contrast agents offered for a modality.
pub fn contrast_options(modality: &str) -> &'static [ChoiceOption] {
    match modality {
        "CT" => CT_CONTRAST,
        "MRI" => MRI_CONTRAST,
        _ => NO_CONTRAST,
    }
}

pub fn report_title(modality: &str) -> &'static str {
    match modality {
        "CT" => "CT Liver Report",
        "MRI" => "MRI Liver Report",
        _ => "CT and MRI Liver Report",
    }
}

/// The set of sections whose own display predicate holds. A section is
/// effectively shown only when all of its ancestors are in the set too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    shown: BTreeSet<SectionId>,
}

impl Visibility {
    pub fn shows(&self, section: SectionId) -> bool {
        let mut current = Some(section);
        while let Some(s) = current {
            if !self.shown.contains(&s) {
                return false;
            }
            current = s.parent();
        }
        true
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.shown.iter().copied().filter(|s| self.shows(*s))
    }
}

pub fn compute_visibility(state: &FormState) -> Visibility {
    let mut shown = BTreeSet::from([
        SectionId::Patient,
        SectionId::Procedure,
        SectionId::Clinical,
        SectionId::Comparison,
        SectionId::Findings,
        SectionId::Impression,
    ]);

    if state.value(STUDY_CONTRAST_KEY) == "contrast" {
        shown.insert(SectionId::ContrastDetails);
    }
    if state.value(USE_SUBTRACTION) == YES {
        shown.insert(SectionId::SubtractionPurpose);
    }
    if state.value(ANY_TREATMENT) == YES {
        shown.insert(SectionId::TreatmentHistory);
        shown.insert(SectionId::Pathology);
    }
    if state.value(COMPARISON_AVAILABLE) == YES {
        shown.insert(SectionId::ComparisonDetails);
    }

    match state.observation_mode() {
        Some(ObservationMode::Lesion) => {
            shown.insert(SectionId::LesionCount);
            shown.insert(SectionId::LesionObservations);
            for lesion in state.lesions() {
                let index = lesion.index;
                shown.insert(SectionId::Lesion { index });
                for field in [LesionField::Benignity, LesionField::Malignancy, LesionField::Hcc] {
                    if let Some(category) = field.ancillary_category()
                        && field.get(lesion) == YES
                    {
                        shown.insert(SectionId::AncillaryDetail { index, category });
                    }
                }
                if lesion.treated == YES {
                    shown.insert(SectionId::TreatedDetails { index });
                }
            }
        }
        Some(ObservationMode::NonLesion) => {
            shown.insert(SectionId::Aggregate);
        }
        None => {}
    }

    Visibility { shown }
}

/// Everything the page needs to render besides the field values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: &'static str,
    pub contrast_options: &'static [ChoiceOption],
    pub prior_contrast_options: &'static [ChoiceOption],
    pub sections: Vec<SectionId>,
    pub treatment_dates_removable: bool,
    pub lesion_count: usize,
}

pub fn view(state: &FormState) -> FormView {
    let visibility = compute_visibility(state);
    FormView {
        title: report_title(state.value(MODALITY)),
        contrast_options: contrast_options(state.value(MODALITY)),
        prior_contrast_options: contrast_options(state.value(PRIOR_EXAM_MODALITY)),
        sections: visibility.sections().collect(),
        treatment_dates_removable: state.treatment_dates().len() > 1,
        lesion_count: state.lesions().len(),
    }
}
