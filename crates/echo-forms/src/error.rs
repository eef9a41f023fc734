use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form template: {0}")]
    UnknownTemplate(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{0}' is a checkbox; set its checked state instead")]
    CheckboxValue(String),

    #[error("field '{0}' is not a checkbox")]
    NotACheckbox(String),

    #[error("'{value}' is not a valid choice for '{key}'")]
    InvalidChoice { key: String, value: String },

    #[error("field '{0}' is not currently shown")]
    HiddenField(String),

    #[error("no lesion block with index {0}")]
    NoSuchLesion(u32),

    #[error("no treatment date row {0}")]
    NoSuchTreatmentDate(usize),

    #[error("the last treatment date row cannot be removed")]
    LastTreatmentDate,
}
