//! Field registry of the CT/MR liver template.

use echo_core::models::record::LesionObservation;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::field::{AncillaryCategory, FieldDef, FieldKind, SectionId};

pub const YES: &str = "Yes";
pub const NO: &str = "No";

const YES_NO: &[&str] = &[YES, NO];
const YES_NONE: &[&str] = &[YES, "None"];
const SEXES: &[&str] = &["Male", "Female", "Other"];
const MODALITIES: &[&str] = &["CT", "MRI"];
const STUDY_CONTRAST: &[&str] = &["contrast", "non-contrast"];
const OBSERVATION_MODES: &[&str] = &["lesion", "non-lesion"];
const SEGMENTS: &[&str] = &["I", "II", "III", "IVa", "IVb", "V", "VI", "VII", "VIII"];
const THRESHOLD_GROWTH: &[&str] = &[YES, NO, "N/A"];

pub const RISK_FACTORS_GROUP: &str = "riskFactors";
pub const RISK_FACTOR_PREFIX: &str = "rf_";

pub const PATIENT_NAME: &str = "patientName";
pub const DOB: &str = "dob";
pub const AGE: &str = "age";
pub const SEX: &str = "sex";
pub const PATIENT_ID: &str = "patientId";
pub const REPORT_ID: &str = "reportId";
pub const REPORT_DATE: &str = "reportDate";
pub const MODALITY: &str = "modality";
pub const STUDY_CONTRAST_KEY: &str = "studyContrast";
pub const CONTRAST_TYPE: &str = "contrastType";
pub const USE_SUBTRACTION: &str = "useSubtraction";
pub const ANY_TREATMENT: &str = "anyTreatment";
pub const COMPARISON_AVAILABLE: &str = "comparisonAvailable";
pub const PRIOR_EXAM_MODALITY: &str = "priorExamModality";
pub const PRIOR_CONTRAST_TYPE: &str = "priorContrastType";
pub const OBSERVATION_MODE: &str = "observationMode";
pub const LESION_COUNT: &str = "lesionCount";

/// Identity fields are checked by the submit pipeline, not the validation pass.
pub const IDENTITY_FIELDS: &[&str] = &[REPORT_ID, PATIENT_ID];

use FieldKind::*;
use SectionId::*;

pub static SCALAR_FIELDS: &[FieldDef] = &[
    // Patient
    FieldDef::new(PATIENT_NAME, "Patient name", Text, Patient),
    FieldDef::new(DOB, "Date of birth", Date, Patient),
    FieldDef::new(AGE, "Age", Number, Patient),
    FieldDef::new(SEX, "Sex", Select, Patient).options(SEXES),
    FieldDef::new(PATIENT_ID, "Patient ID", Text, Patient).optional(),
    FieldDef::new(REPORT_ID, "Report ID", Text, Patient).optional(),
    FieldDef::new("referrer", "Referring physician", Text, Patient),
    FieldDef::new("institution", "Institution", Text, Patient),
    FieldDef::new(REPORT_DATE, "Report date", DateTime, Patient),
    // Procedure
    FieldDef::new(MODALITY, "Modality", Select, Procedure).options(MODALITIES),
    FieldDef::new(STUDY_CONTRAST_KEY, "Study", Radio, Procedure).options(STUDY_CONTRAST),
    FieldDef::new(CONTRAST_TYPE, "Contrast agent", Select, ContrastDetails),
    FieldDef::new("contrastVolume", "Contrast volume (mL)", Number, ContrastDetails),
    FieldDef::new(USE_SUBTRACTION, "Vascular subtraction", Select, Procedure).options(YES_NO),
    FieldDef::new("subtractionPurpose", "Subtraction purpose", Text, SubtractionPurpose),
    // Clinical
    FieldDef::new("rf_cirrhosis", "Cirrhosis", Checkbox, Clinical).group(RISK_FACTORS_GROUP),
    FieldDef::new("rf_hbv", "HBV", Checkbox, Clinical).group(RISK_FACTORS_GROUP),
    FieldDef::new("rf_hcv", "HCV", Checkbox, Clinical).group(RISK_FACTORS_GROUP),
    FieldDef::new("rf_prior_hcc", "Prior HCC", Checkbox, Clinical).group(RISK_FACTORS_GROUP),
    FieldDef::new("rf_transplant", "Transplant", Checkbox, Clinical).group(RISK_FACTORS_GROUP),
    FieldDef::new("etiologyOfLiverDisease", "Etiology of liver disease", Text, Clinical),
    FieldDef::new(ANY_TREATMENT, "Any treatment", Radio, Clinical).options(YES_NO),
    FieldDef::new("treatmentModalityHistory", "Treatment modality", Text, TreatmentHistory),
    FieldDef::new("pathologyDiagnosis", "Pathology diagnosis", Text, Pathology),
    FieldDef::new("pathologyDate", "Pathology date", Date, Pathology),
    // Comparison
    FieldDef::new(COMPARISON_AVAILABLE, "Comparison available", Select, Comparison)
        .options(YES_NO),
    FieldDef::new(PRIOR_EXAM_MODALITY, "Prior exam modality", Select, ComparisonDetails)
        .options(MODALITIES),
    FieldDef::new(PRIOR_CONTRAST_TYPE, "Prior contrast", Select, ComparisonDetails),
    FieldDef::new("priorExamDate", "Prior exam date", Date, ComparisonDetails),
    FieldDef::new("comparisonRemarks", "Remarks", TextArea, ComparisonDetails).optional(),
    // Findings
    FieldDef::new("cirrhosis", "Cirrhosis", Radio, Findings).options(YES_NO),
    FieldDef::new("steatosis", "Steatosis", Radio, Findings).options(YES_NO),
    FieldDef::new("siderosis", "Siderosis", Radio, Findings).options(YES_NO),
    FieldDef::new("portalHypertension", "Portal hypertension", Radio, Findings)
        .options(YES_NO),
    FieldDef::new("extraHepatic", "Extra-hepatic findings", TextArea, Findings).optional(),
    FieldDef::new(OBSERVATION_MODE, "Observations", Radio, Findings).options(OBSERVATION_MODES),
    FieldDef::new(LESION_COUNT, "Number of lesions", Number, LesionCount),
    FieldDef::new("aggregateIdentifier", "Identifier", Text, Aggregate),
    FieldDef::new("aggregateSize", "Size (mm)", Number, Aggregate),
    FieldDef::new("aggregateLocation", "Location", Text, Aggregate),
    FieldDef::new("aggregateImagingFeatures", "Imaging features", Text, Aggregate),
    FieldDef::new("aggregateVascular", "Vascular involvement", Text, Aggregate),
    FieldDef::new("aggregateBiliary", "Biliary involvement", Text, Aggregate),
    // Impression
    FieldDef::new("impressionSummary", "Impression", TextArea, Impression),
    FieldDef::new("recommendation", "Recommendation", TextArea, Impression),
    FieldDef::new("examConclusion", "Conclusion", TextArea, Impression).optional(),
    FieldDef::new("createdBy", "Created by", Text, Impression),
    FieldDef::new("approvedBy", "Approved by", Text, Impression).optional(),
];

pub fn scalar_field(key: &str) -> Option<&'static FieldDef> {
    SCALAR_FIELDS.iter().find(|f| f.key == key)
}

/// The fields of one lesion observation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LesionField {
    #[serde(rename = "segment")]
    Segment,
    #[serde(rename = "size_cm")]
    SizeCm,
    #[serde(rename = "size_mm")]
    SizeMm,
    #[serde(rename = "imageid")]
    ImageId,
    #[serde(rename = "seriesNumber")]
    SeriesNumber,
    #[serde(rename = "tumorInVein")]
    TumorInVein,
    #[serde(rename = "lrMfeatures")]
    LrMFeatures,
    #[serde(rename = "lrMetiology")]
    LrMEtiology,
    #[serde(rename = "nonrimAPHE")]
    NonrimAphe,
    #[serde(rename = "washout")]
    Washout,
    #[serde(rename = "enhCapsule")]
    EnhancingCapsule,
    #[serde(rename = "thresholdGrowth")]
    ThresholdGrowth,
    #[serde(rename = "benignity")]
    Benignity,
    #[serde(rename = "benignitySpec")]
    BenignitySpec,
    #[serde(rename = "malignancy")]
    Malignancy,
    #[serde(rename = "malignancySpec")]
    MalignancySpec,
    #[serde(rename = "hcc")]
    Hcc,
    #[serde(rename = "hccSpec")]
    HccSpec,
    #[serde(rename = "ancillaryOther")]
    AncillaryOther,
    #[serde(rename = "treated")]
    Treated,
    #[serde(rename = "equivSize")]
    EquivocalSize,
    #[serde(rename = "pretLR")]
    PretreatmentLr,
    #[serde(rename = "pretSize")]
    PretreatmentSize,
    #[serde(rename = "treatModality")]
    TreatmentModality,
    #[serde(rename = "interimChange")]
    InterimChange,
}

impl LesionField {
    pub const ALL: [LesionField; 25] = [
        LesionField::Segment,
        LesionField::SizeCm,
        LesionField::SizeMm,
        LesionField::ImageId,
        LesionField::SeriesNumber,
        LesionField::TumorInVein,
        LesionField::LrMFeatures,
        LesionField::LrMEtiology,
        LesionField::NonrimAphe,
        LesionField::Washout,
        LesionField::EnhancingCapsule,
        LesionField::ThresholdGrowth,
        LesionField::Benignity,
        LesionField::BenignitySpec,
        LesionField::Malignancy,
        LesionField::MalignancySpec,
        LesionField::Hcc,
        LesionField::HccSpec,
        LesionField::AncillaryOther,
        LesionField::Treated,
        LesionField::EquivocalSize,
        LesionField::PretreatmentLr,
        LesionField::PretreatmentSize,
        LesionField::TreatmentModality,
        LesionField::InterimChange,
    ];

    /// Base name of the field; rendered keys are `{key}_{index}`.
    pub fn key(self) -> &'static str {
        match self {
            LesionField::Segment => "segment",
            LesionField::SizeCm => "size_cm",
            LesionField::SizeMm => "size_mm",
            LesionField::ImageId => "imageid",
            LesionField::SeriesNumber => "seriesNumber",
            LesionField::TumorInVein => "tumorInVein",
            LesionField::LrMFeatures => "lrMfeatures",
            LesionField::LrMEtiology => "lrMetiology",
            LesionField::NonrimAphe => "nonrimAPHE",
            LesionField::Washout => "washout",
            LesionField::EnhancingCapsule => "enhCapsule",
            LesionField::ThresholdGrowth => "thresholdGrowth",
            LesionField::Benignity => "benignity",
            LesionField::BenignitySpec => "benignitySpec",
            LesionField::Malignancy => "malignancy",
            LesionField::MalignancySpec => "malignancySpec",
            LesionField::Hcc => "hcc",
            LesionField::HccSpec => "hccSpec",
            LesionField::AncillaryOther => "ancillaryOther",
            LesionField::Treated => "treated",
            LesionField::EquivocalSize => "equivSize",
            LesionField::PretreatmentLr => "pretLR",
            LesionField::PretreatmentSize => "pretSize",
            LesionField::TreatmentModality => "treatModality",
            LesionField::InterimChange => "interimChange",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            LesionField::Segment
            | LesionField::Benignity
            | LesionField::Malignancy
            | LesionField::Hcc
            | LesionField::Treated => Select,
            LesionField::SizeCm
            | LesionField::SizeMm
            | LesionField::ImageId
            | LesionField::SeriesNumber
            | LesionField::EquivocalSize
            | LesionField::PretreatmentSize => Number,
            LesionField::TumorInVein
            | LesionField::NonrimAphe
            | LesionField::Washout
            | LesionField::EnhancingCapsule
            | LesionField::ThresholdGrowth => Radio,
            _ => Text,
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            LesionField::Segment => SEGMENTS,
            LesionField::TumorInVein
            | LesionField::NonrimAphe
            | LesionField::Washout
            | LesionField::EnhancingCapsule
            | LesionField::Treated => YES_NO,
            LesionField::ThresholdGrowth => THRESHOLD_GROWTH,
            LesionField::Benignity | LesionField::Malignancy | LesionField::Hcc => YES_NONE,
            _ => &[],
        }
    }

    pub fn optional(self) -> bool {
        self == LesionField::AncillaryOther
    }

    /// The ancillary category whose select this field is, if any.
    pub fn ancillary_category(self) -> Option<AncillaryCategory> {
        match self {
            LesionField::Benignity => Some(AncillaryCategory::Benignity),
            LesionField::Malignancy => Some(AncillaryCategory::Malignancy),
            LesionField::Hcc => Some(AncillaryCategory::Hcc),
            _ => None,
        }
    }

    /// The container this field lives in within lesion block `index`.
    pub fn section(self, index: u32) -> SectionId {
        match self {
            LesionField::BenignitySpec => AncillaryDetail {
                index,
                category: AncillaryCategory::Benignity,
            },
            LesionField::MalignancySpec => AncillaryDetail {
                index,
                category: AncillaryCategory::Malignancy,
            },
            LesionField::HccSpec => AncillaryDetail {
                index,
                category: AncillaryCategory::Hcc,
            },
            LesionField::EquivocalSize
            | LesionField::PretreatmentLr
            | LesionField::PretreatmentSize
            | LesionField::TreatmentModality
            | LesionField::InterimChange => TreatedDetails { index },
            _ => Lesion { index },
        }
    }

    /// Input filtering applied to numeric lesion fields as the user types.
    pub fn sanitize(self, value: &str) -> String {
        match self {
            LesionField::PretreatmentSize => value
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect(),
            f if f.kind() == Number => value.chars().filter(char::is_ascii_digit).collect(),
            _ => value.to_string(),
        }
    }

    pub fn get(self, lesion: &LesionObservation) -> &str {
        match self {
            LesionField::Segment => &lesion.segment,
            LesionField::SizeCm => &lesion.size_cm,
            LesionField::SizeMm => &lesion.size_mm,
            LesionField::ImageId => &lesion.imageid,
            LesionField::SeriesNumber => &lesion.series_number,
            LesionField::TumorInVein => &lesion.tumor_in_vein,
            LesionField::LrMFeatures => &lesion.lr_m_features,
            LesionField::LrMEtiology => &lesion.lr_m_etiology,
            LesionField::NonrimAphe => &lesion.nonrim_aphe,
            LesionField::Washout => &lesion.washout,
            LesionField::EnhancingCapsule => &lesion.enhancing_capsule,
            LesionField::ThresholdGrowth => &lesion.threshold_growth,
            LesionField::Benignity => &lesion.benignity,
            LesionField::BenignitySpec => &lesion.benignity_spec,
            LesionField::Malignancy => &lesion.malignancy,
            LesionField::MalignancySpec => &lesion.malignancy_spec,
            LesionField::Hcc => &lesion.hcc,
            LesionField::HccSpec => &lesion.hcc_spec,
            LesionField::AncillaryOther => &lesion.ancillary_other,
            LesionField::Treated => &lesion.treated,
            LesionField::EquivocalSize => &lesion.equivocal_size,
            LesionField::PretreatmentLr => &lesion.pretreatment_lr,
            LesionField::PretreatmentSize => &lesion.pretreatment_size,
            LesionField::TreatmentModality => &lesion.treatment_modality,
            LesionField::InterimChange => &lesion.interim_change,
        }
    }

    pub fn slot(self, lesion: &mut LesionObservation) -> &mut String {
        match self {
            LesionField::Segment => &mut lesion.segment,
            LesionField::SizeCm => &mut lesion.size_cm,
            LesionField::SizeMm => &mut lesion.size_mm,
            LesionField::ImageId => &mut lesion.imageid,
            LesionField::SeriesNumber => &mut lesion.series_number,
            LesionField::TumorInVein => &mut lesion.tumor_in_vein,
            LesionField::LrMFeatures => &mut lesion.lr_m_features,
            LesionField::LrMEtiology => &mut lesion.lr_m_etiology,
            LesionField::NonrimAphe => &mut lesion.nonrim_aphe,
            LesionField::Washout => &mut lesion.washout,
            LesionField::EnhancingCapsule => &mut lesion.enhancing_capsule,
            LesionField::ThresholdGrowth => &mut lesion.threshold_growth,
            LesionField::Benignity => &mut lesion.benignity,
            LesionField::BenignitySpec => &mut lesion.benignity_spec,
            LesionField::Malignancy => &mut lesion.malignancy,
            LesionField::MalignancySpec => &mut lesion.malignancy_spec,
            LesionField::Hcc => &mut lesion.hcc,
            LesionField::HccSpec => &mut lesion.hcc_spec,
            LesionField::AncillaryOther => &mut lesion.ancillary_other,
            LesionField::Treated => &mut lesion.treated,
            LesionField::EquivocalSize => &mut lesion.equivocal_size,
            LesionField::PretreatmentLr => &mut lesion.pretreatment_lr,
            LesionField::PretreatmentSize => &mut lesion.pretreatment_size,
            LesionField::TreatmentModality => &mut lesion.treatment_modality,
            LesionField::InterimChange => &mut lesion.interim_change,
        }
    }
}
