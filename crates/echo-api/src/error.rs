use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use echo_core::models::user::RegistrationIssue;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Required form fields are empty; nothing was persisted.
    Validation { missing: Vec<String> },
    Registration(Vec<RegistrationIssue>),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<RegistrationIssue>>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            missing: None,
            issues: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::message(msg)),
            ApiError::Validation { missing } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "required fields are missing".to_string(),
                    missing: Some(missing),
                    issues: None,
                },
            ),
            ApiError::Registration(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "registration form is invalid".to_string(),
                    missing: None,
                    issues: Some(issues),
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<echo_storage::error::StorageError> for ApiError {
    fn from(e: echo_storage::error::StorageError) -> Self {
        match e {
            echo_storage::error::StorageError::NotFound { key } => {
                ApiError::NotFound(format!("document not found: {key}"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<echo_chat::error::ChatError> for ApiError {
    fn from(e: echo_chat::error::ChatError) -> Self {
        use echo_chat::error::ChatError;
        match e {
            ChatError::SessionNotFound(id) => {
                ApiError::NotFound(format!("chat session not found: {id}"))
            }
            ChatError::EmptyMessage => ApiError::BadRequest("message is empty".to_string()),
            ChatError::Storage(storage) => storage.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<echo_forms::error::FormError> for ApiError {
    fn from(e: echo_forms::error::FormError) -> Self {
        match e {
            echo_forms::error::FormError::UnknownTemplate(id) => {
                ApiError::NotFound(format!("form template not found: {id}"))
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<echo_export::error::ExportError> for ApiError {
    fn from(e: echo_export::error::ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<echo_core::error::CoreError> for ApiError {
    fn from(e: echo_core::error::CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
