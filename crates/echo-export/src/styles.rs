use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Times New Roman", "Calibri").
    pub body_font: String,

    /// Font for the title and metadata labels.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Report title font size in points.
    pub title_size: usize,

    /// Section heading font size in points.
    pub heading_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Arial".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            title_size: 16,
            heading_size: 12,
        }
    }
}
