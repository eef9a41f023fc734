use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single collected control value: text for inputs/selects/radio groups,
/// a flag for checkboxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// How focal findings are described: discrete lesions or one aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ObservationMode {
    Lesion,
    NonLesion,
}

impl ObservationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationMode::Lesion => "lesion",
            ObservationMode::NonLesion => "non-lesion",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "lesion" => Some(ObservationMode::Lesion),
            "non-lesion" => Some(ObservationMode::NonLesion),
            _ => None,
        }
    }
}

/// The structured record produced by the data collector and stored as
/// `templateData`. Scalar controls are flattened at the top level.
///
/// Exactly one of `lesions` / `aggregate` is populated, according to the
/// observation mode; neither when the mode is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,

    #[serde(rename = "treatmentDates", default, skip_serializing_if = "Vec::is_empty")]
    pub treatment_dates: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lesions: Vec<LesionObservation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateObservation>,
}

impl FormRecord {
    /// Text value of a scalar field; empty when absent or a checkbox.
    pub fn text(&self, key: &str) -> &str {
        self.fields
            .get(key)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Trimmed text value, `None` when blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        let value = self.text(key).trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn is_yes(&self, key: &str) -> bool {
        self.text(key) == "Yes"
    }

    pub fn observation_mode(&self) -> Option<ObservationMode> {
        ObservationMode::from_value(self.text("observationMode"))
    }

    /// Keys of checked checkboxes whose key starts with `prefix`, in key order.
    pub fn checked_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |(k, v)| k.starts_with(prefix) && v.is_checked())
            .map(|(k, _)| k.as_str())
    }
}

/// Snapshot of one lesion block. Wire names follow the form's control names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct LesionObservation {
    pub index: u32,
    pub segment: String,
    pub size_cm: String,
    pub size_mm: String,
    pub imageid: String,
    #[serde(rename = "seriesNumber")]
    pub series_number: String,
    #[serde(rename = "tumorInVein")]
    pub tumor_in_vein: String,
    #[serde(rename = "lrMfeatures")]
    pub lr_m_features: String,
    #[serde(rename = "lrMetiology")]
    pub lr_m_etiology: String,

    // Major imaging features
    #[serde(rename = "nonrimAPHE")]
    pub nonrim_aphe: String,
    pub washout: String,
    #[serde(rename = "enhCapsule")]
    pub enhancing_capsule: String,
    #[serde(rename = "thresholdGrowth")]
    pub threshold_growth: String,

    // Ancillary features
    pub benignity: String,
    #[serde(rename = "benignitySpec")]
    pub benignity_spec: String,
    pub malignancy: String,
    #[serde(rename = "malignancySpec")]
    pub malignancy_spec: String,
    pub hcc: String,
    #[serde(rename = "hccSpec")]
    pub hcc_spec: String,
    #[serde(rename = "ancillaryOther")]
    pub ancillary_other: String,

    // Treated observation
    pub treated: String,
    #[serde(rename = "equivSize")]
    pub equivocal_size: String,
    #[serde(rename = "pretLR")]
    pub pretreatment_lr: String,
    #[serde(rename = "pretSize")]
    pub pretreatment_size: String,
    #[serde(rename = "treatModality")]
    pub treatment_modality: String,
    #[serde(rename = "interimChange")]
    pub interim_change: String,
}

impl LesionObservation {
    /// A fresh, empty block for lesion `index` (1-based).
    pub fn blank(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// The single diffuse/confluent finding described in non-lesion mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AggregateObservation {
    pub identifier: String,
    pub size_mm: String,
    pub location: String,
    #[serde(rename = "imagingFeatures")]
    pub imaging_features: String,
    pub vascular: String,
    pub biliary: String,
}
