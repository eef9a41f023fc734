use echo_storage::error::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("failed to parse model response: {0}")]
    ResponseParse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("chat session not found: {0}")]
    SessionNotFound(String),

    #[error("empty message")]
    EmptyMessage,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
