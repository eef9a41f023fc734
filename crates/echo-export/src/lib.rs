//! echo-export
//!
//! Narrative report text from form records, and the standard report page
//! and DOCX renderings of a saved report.

pub mod docx;
pub mod error;
pub mod narrative;
pub mod render;
pub mod styles;
