use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    #[error("gave up on {key} after {attempts} conflicting writes")]
    Contention { key: String, attempts: u32 },

    #[error("document {key} is not a JSON object")]
    NotAnObject { key: String },

    #[error("counter {key} holds no numeric `current` value")]
    InvalidCounter { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),
}
