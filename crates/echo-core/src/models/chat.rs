use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Patient and exam details pulled out of free-text chat by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExtractedData {
    #[serde(default)]
    pub exam_type: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Models return the age as a number or a string; both are kept as text.
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}

impl ExtractedData {
    /// Fill fields still missing from `prior`. Newly extracted values win.
    pub fn fill_gaps_from(&mut self, prior: &ExtractedData) {
        fn fill(slot: &mut Option<String>, prior: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(prior);
            }
        }
        fill(&mut self.exam_type, &prior.exam_type);
        fill(&mut self.patient_name, &prior.patient_name);
        fill(&mut self.age, &prior.age);
        fill(&mut self.gender, &prior.gender);
        fill(&mut self.dob, &prior.dob);
    }

    pub fn is_empty(&self) -> bool {
        self.exam_type.is_none()
            && self.patient_name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.dob.is_none()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A chat session document. The latest extraction is denormalized here so
/// the template prefill needs a single document read.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatSession {
    pub session_id: String,
    pub user_id: String,
    pub auth_uid: String,
    pub user_email: String,
    pub start_time: jiff::Timestamp,
    pub last_updated: jiff::Timestamp,
    #[serde(default)]
    pub latest_extraction: Option<ExtractedData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatMessageDoc {
    pub message_id: String,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_template: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MessageRole {
    User,
    Bot,
}
