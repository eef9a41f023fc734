//! Text model invocation with ordered fallback.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use echo_core::models::chat::ExtractedData;
use tracing::{info, warn};

use crate::error::ChatError;
use crate::extract::{parse_reply, suggest_template_code};
use crate::prompt::{SYSTEM_PROMPT, user_prompt};

/// Reply returned when every configured model failed.
pub const OVERLOADED_MESSAGE: &str =
    "I am overloaded right now (Rate Limit Reached). Please wait 1 minute and try again.";

/// A single-turn text model.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn model_id(&self) -> &str;

    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ChatError>;
}

/// A Claude model (or inference profile) called through the Converse API.
pub struct BedrockModel {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockModel {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl TextModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ChatError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_text.to_string()))
            .build()
            .map_err(|e| ChatError::Invocation(e.to_string()))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .send()
            .await
            .map_err(|e| ChatError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| ChatError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

/// Build one [`BedrockModel`] per configured model ID, in order.
pub fn bedrock_models(config: &aws_config::SdkConfig, model_ids: &[String]) -> Vec<Box<dyn TextModel>> {
    model_ids
        .iter()
        .map(|id| Box::new(BedrockModel::new(config, id.clone())) as Box<dyn TextModel>)
        .collect()
}

/// The outcome of one extraction request.
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub ai_message: String,
    pub extracted: ExtractedData,
    pub suggested_template: Option<String>,
    /// The model that answered; `None` when all of them failed.
    pub model_id: Option<String>,
}

/// Ask each model in turn until one returns a parseable reply.
///
/// Invocation and parse failures both move on to the next model. When every
/// model fails the reply is [`OVERLOADED_MESSAGE`] and the prior extraction
/// is returned unchanged.
pub async fn generate_ai_response(
    models: &[Box<dyn TextModel>],
    message: &str,
    prior: Option<&ExtractedData>,
) -> AiResponse {
    match user_prompt(message, prior) {
        Ok(prompt) => {
            for model in models {
                let model_id = model.model_id();
                info!(model_id, "trying model");

                let reply = match model.complete(SYSTEM_PROMPT, &prompt).await {
                    Ok(text) => parse_reply(&text, prior),
                    Err(e) => Err(e),
                };

                match reply {
                    Ok(reply) => {
                        let suggested_template =
                            suggest_template_code(&reply.extracted).map(str::to_string);
                        return AiResponse {
                            ai_message: reply.ai_message,
                            extracted: reply.extracted,
                            suggested_template,
                            model_id: Some(model_id.to_string()),
                        };
                    }
                    Err(e) => warn!(model_id, error = %e, "model failed, trying next"),
                }
            }
        }
        Err(e) => warn!(error = %e, "failed to build prompt"),
    }

    warn!(models = models.len(), "all models failed");
    AiResponse {
        ai_message: OVERLOADED_MESSAGE.to_string(),
        extracted: prior.cloned().unwrap_or_default(),
        suggested_template: None,
        model_id: None,
    }
}
