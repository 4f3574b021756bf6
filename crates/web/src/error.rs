use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registration::{DocumentError, RegistrationError};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Registration(RegistrationError),
    Document(DocumentError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Registration(e) => write!(f, "Registration error: {}", e),
            Self::Document(e) => write!(f, "Document error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::DuplicateId(_))
            | Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Registration(RegistrationError::MissingPhoto) => StatusCode::BAD_REQUEST,
            Self::Registration(RegistrationError::QrGenerationFailed(_))
            | Self::Registration(RegistrationError::DraftGenerationFailed(_)) => StatusCode::BAD_GATEWAY,
            Self::Registration(RegistrationError::Unexpected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Document(DocumentError::UnknownKind(_)) => StatusCode::BAD_REQUEST,
            Self::Document(DocumentError::Pdf(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(e @ StorageError::DuplicateId(_)) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Registration(RegistrationError::Unexpected(msg)) => {
                tracing::error!("Registration failed unexpectedly: {}", msg);
                json!({
                    "error": "An unexpected error occurred. Please try again."
                })
            }
            Self::Registration(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Document(DocumentError::Pdf(msg)) => {
                tracing::error!("PDF generation failed: {}", msg);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Document(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<RegistrationError> for WebError {
    fn from(error: RegistrationError) -> Self {
        Self::Registration(error)
    }
}

impl From<DocumentError> for WebError {
    fn from(error: DocumentError) -> Self {
        Self::Document(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;
