use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::registry::LesionField;

/// The kind of control a field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    DateTime,
    Select,
    /// One logical field rendered as a group of radio buttons.
    Radio,
    Checkbox,
    /// Never shown to the user; excluded from validation.
    Hidden,
}

impl FieldKind {
    /// Kinds checked by the generic "value is empty" pass.
    pub fn is_value_control(self) -> bool {
        !matches!(self, FieldKind::Radio | FieldKind::Checkbox | FieldKind::Hidden)
    }
}

/// Which ancillary-feature category a detail block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AncillaryCategory {
    Benignity,
    Malignancy,
    Hcc,
}

/// A container whose display can be toggled. Nested sections are only
/// shown when every ancestor is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "section", rename_all = "snake_case")]
#[ts(export)]
pub enum SectionId {
    Patient,
    Procedure,
    ContrastDetails,
    SubtractionPurpose,
    Clinical,
    TreatmentHistory,
    Pathology,
    Comparison,
    ComparisonDetails,
    Findings,
    LesionCount,
    LesionObservations,
    Lesion { index: u32 },
    AncillaryDetail { index: u32, category: AncillaryCategory },
    TreatedDetails { index: u32 },
    Aggregate,
    Impression,
}

impl SectionId {
    pub fn parent(self) -> Option<SectionId> {
        match self {
            SectionId::Patient
            | SectionId::Procedure
            | SectionId::Clinical
            | SectionId::Comparison
            | SectionId::Findings
            | SectionId::Impression => None,
            SectionId::ContrastDetails | SectionId::SubtractionPurpose => {
                Some(SectionId::Procedure)
            }
            SectionId::TreatmentHistory | SectionId::Pathology => Some(SectionId::Clinical),
            SectionId::ComparisonDetails => Some(SectionId::Comparison),
            SectionId::LesionCount | SectionId::LesionObservations | SectionId::Aggregate => {
                Some(SectionId::Findings)
            }
            SectionId::Lesion { .. } => Some(SectionId::LesionObservations),
            SectionId::AncillaryDetail { index, .. } | SectionId::TreatedDetails { index } => {
                Some(SectionId::Lesion { index })
            }
        }
    }
}

/// One entry of a select or radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Static definition of a scalar form control.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: SectionId,
    /// Optional controls are never reported as missing.
    pub optional: bool,
    /// Allowed values for selects and radios. Empty means the list is
    /// computed at runtime (e.g. contrast agents per modality).
    pub options: &'static [&'static str],
    /// Checkbox group this control belongs to.
    pub group: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        section: SectionId,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            section,
            optional: false,
            options: &[],
            group: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub const fn group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }
}

/// Reference to a control instance in a rendered form, used to report
/// missing values and drive highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldRef {
    Scalar(&'static str),
    /// Zero-based treatment date row.
    TreatmentDate(usize),
    Lesion { index: u32, field: LesionField },
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Scalar(key) => f.write_str(key),
            FieldRef::TreatmentDate(row) => write!(f, "treatmentDate_{}", row + 1),
            FieldRef::Lesion { index, field } => write!(f, "{}_{index}", field.key()),
        }
    }
}

impl Serialize for FieldRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
