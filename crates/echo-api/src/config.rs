use std::env;

/// Which document store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    S3,
    /// Process-local; documents are lost when the function instance exits.
    Memory,
}

pub const DEFAULT_CHAT_MODELS: &[&str] = &[
    "us.anthropic.claude-3-5-haiku-20241022-v1:0",
    "us.anthropic.claude-sonnet-4-20250514-v1:0",
];

#[derive(Debug, Clone)]
pub struct EchoConfig {
    pub bucket: String,
    pub region: String,
    /// Bedrock model or inference profile IDs, tried in order.
    pub chat_models: Vec<String>,
    pub store: StoreKind,
}

impl EchoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source; unset or blank values
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let chat_models = var("ECHO_CHAT_MODELS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|ids| !ids.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAT_MODELS.iter().map(|id| id.to_string()).collect());

        let store = match var("ECHO_STORE").as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("memory") => StoreKind::Memory,
            _ => StoreKind::S3,
        };

        Self {
            bucket: var("ECHO_BUCKET").unwrap_or_else(|| "dr-echo".to_string()),
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            chat_models,
            store,
        }
    }
}
