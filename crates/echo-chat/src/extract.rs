//! Parsing of the model's JSON reply.

use echo_core::models::chat::ExtractedData;
use serde::Deserialize;

use crate::error::ChatError;

/// Reply text used when the model omits `ai_response`.
pub const DEFAULT_AI_MESSAGE: &str = "Processing complete.";

/// Template code for liver exams; resolves to the assisted CT/MR liver form.
pub const LIVER_TEMPLATE_CODE: &str = "T001";
pub const CARDIAC_TEMPLATE_CODE: &str = "T002";

/// A parsed model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub ai_message: String,
    pub extracted: ExtractedData,
}

#[derive(Deserialize)]
struct RawReply {
    #[serde(flatten)]
    extracted: ExtractedData,
    #[serde(default)]
    ai_response: Option<String>,
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````).
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => text.trim_start_matches("```json").trim_start_matches("```"),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parse a model reply and fill any field the model left null from `prior`.
pub fn parse_reply(text: &str, prior: Option<&ExtractedData>) -> Result<ModelReply, ChatError> {
    let raw: RawReply = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| ChatError::ResponseParse(e.to_string()))?;

    let mut extracted = raw.extracted;
    if let Some(prior) = prior {
        extracted.fill_gaps_from(prior);
    }

    Ok(ModelReply {
        ai_message: raw
            .ai_response
            .unwrap_or_else(|| DEFAULT_AI_MESSAGE.to_string()),
        extracted,
    })
}

/// Suggest a template code from the extracted exam type.
pub fn suggest_template_code(extracted: &ExtractedData) -> Option<&'static str> {
    let exam = extracted.exam_type.as_deref()?.to_lowercase();
    if exam.contains("liver") {
        Some(LIVER_TEMPLATE_CODE)
    } else if exam.contains("cardiac") {
        Some(CARDIAC_TEMPLATE_CODE)
    } else {
        None
    }
}
