//! API error type mapped to HTTP status codes.
//!
//! Every variant except `Unauthorized` produces a JSON body
//! `{"error": "message"}`. Internal failures are logged and answered with a
//! generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error, warn};

use recipebook_core::{AiError, AuthError, InvalidDocumentId, StoreError, ValidationError};
use recipebook_core::ai::LlmError;

#[derive(Debug)]
pub enum ApiError {
    /// Invalid request parameters (400).
    BadRequest(String),
    /// Missing or invalid credentials (401, empty body).
    Unauthorized,
    /// Failed login (401 with a body).
    InvalidLogin,
    /// Resource not found (404).
    NotFound(String),
    /// Resource already exists (409).
    Conflict(String),
    /// The model answered with something unusable (502).
    BadGateway(String),
    /// A dependency is not configured (503).
    ServiceUnavailable(String),
    /// Unexpected server error (500). The detail is only logged.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            ApiError::InvalidLogin => (StatusCode::UNAUTHORIZED, "Invalid login".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(what) => ApiError::Conflict(format!("{} already exists", what)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Store(store) => store.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<InvalidDocumentId> for ApiError {
    fn from(_: InvalidDocumentId) -> Self {
        ApiError::BadRequest("Invalid id".to_string())
    }
}

impl From<AiError> for ApiError {
    fn from(e: AiError) -> Self {
        match e {
            AiError::Llm(LlmError::NotConfigured) => {
                ApiError::ServiceUnavailable("AI service is not configured".to_string())
            }
            AiError::Llm(llm) => {
                warn!("AI provider request failed: {}", llm);
                ApiError::BadGateway("AI service request failed".to_string())
            }
            AiError::MalformedOutput(detail) => {
                warn!("Unusable model output: {}", detail);
                ApiError::BadGateway("AI returned malformed output".to_string())
            }
            AiError::UnknownValue { ref value, .. } => {
                warn!(value = %value, "Model used an unknown value");
                ApiError::NotFound(e.to_string())
            }
            AiError::Store(store) => store.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON body",
            _ => "Invalid request body",
        };
        ApiError::BadRequest(message.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NotAuthenticated | AuthError::InvalidCredentials(_) => {
                ApiError::Unauthorized
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
