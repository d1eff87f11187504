//! Typed error handling for the library web client
//!
//! Errors are grouped by the boundary they come from so callers can react to
//! a specific failure instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`BackendError`]: the backend collaborator failed or answered with a
//!   payload this client cannot read (the "source fetch" family)
//! - [`CriterionError`]: a caller passed an invalid view criterion
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: request bodies that fail field validation
//! - [`RequestError`]: malformed proxy requests (missing parameters, bad ids)
//!
//! # Example
//!
//! ```rust,ignore
//! match backend.get_book("b-42").await {
//!     Ok(book) => println!("{}", book.title),
//!     Err(BackendError::NotFound { id, .. }) => println!("no book {}", id),
//!     Err(e) => eprintln!("backend failure: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Convenience alias used by the proxy handlers and hosting pages
pub type Result<T, E = LibraryError> = std::result::Result<T, E>;

/// Result type returned by every [`Backend`](crate::core::Backend) call
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// The top-level error type of the crate
///
/// Each variant wraps a more specific error for its category.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Criterion(#[from] CriterionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body rendered by the proxy
///
/// `error` carries the human-readable message so existing browser code that
/// reads `body.error` keeps working; `code` is for programmatic handling.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LibraryError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::Backend(e) => e.status_code(),
            LibraryError::Criterion(_) => StatusCode::BAD_REQUEST,
            LibraryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LibraryError::Validation(_) => StatusCode::BAD_REQUEST,
            LibraryError::Request(_) => StatusCode::BAD_REQUEST,
            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LibraryError::Backend(e) => e.error_code(),
            LibraryError::Criterion(_) => "INVALID_CRITERION",
            LibraryError::Config(_) => "CONFIG_ERROR",
            LibraryError::Validation(_) => "VALIDATION_ERROR",
            LibraryError::Request(e) => e.error_code(),
            LibraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the JSON body sent to clients
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LibraryError::Backend(BackendError::NotFound { resource, id }) => {
                Some(serde_json::json!({ "resource": resource, "id": id }))
            }
            LibraryError::Backend(BackendError::Status { status, .. }) => {
                Some(serde_json::json!({ "backendStatus": status }))
            }
            LibraryError::Validation(ValidationError::FieldErrors(fields)) => {
                Some(serde_json::json!({ "fields": fields }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Failures talking to the backend collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout)
    #[error("Backend unreachable: {message}")]
    Transport { message: String },

    /// The backend answered with a non-success status not covered below
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// The operation conflicts with backend state (active loans, duplicates)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backend refused the request as invalid (e.g. extension limit)
    #[error("Rejected: {message}")]
    Rejected { message: String },

    /// The payload was valid JSON but neither a bare array nor an envelope
    #[error("Unrecognized backend payload: {message}")]
    UnrecognizedShape { message: String },

    #[error("Failed to decode backend payload: {message}")]
    Decode { message: String },
}

impl BackendError {
    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Transport { .. } => StatusCode::BAD_GATEWAY,
            BackendError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
            BackendError::Conflict { .. } => StatusCode::CONFLICT,
            BackendError::Rejected { .. } => StatusCode::BAD_REQUEST,
            BackendError::UnrecognizedShape { .. } => StatusCode::BAD_GATEWAY,
            BackendError::Decode { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BackendError::Transport { .. } => "BACKEND_UNREACHABLE",
            BackendError::Status { .. } => "BACKEND_ERROR",
            BackendError::NotFound { .. } => "NOT_FOUND",
            BackendError::Conflict { .. } => "CONFLICT",
            BackendError::Rejected { .. } => "REJECTED",
            BackendError::UnrecognizedShape { .. } => "UNRECOGNIZED_PAYLOAD",
            BackendError::Decode { .. } => "DECODE_ERROR",
        }
    }
}

// =============================================================================
// Criterion Errors
// =============================================================================

/// An invalid filter/sort/page criterion, rejected at the setter boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriterionError {
    #[error("Unknown sort field '{0}' (expected title, author or publishedDate)")]
    UnknownSortField(String),

    #[error("Unknown sort direction '{0}' (expected asc or desc)")]
    UnknownSortDirection(String),

    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field-level validation failures on request bodies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Validation failed for field '{field}': {message}")]
    FieldError { field: String, message: String },

    #[error("Validation failed for {}", field_list(.0))]
    FieldErrors(BTreeMap<String, Vec<String>>),
}

fn field_list(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for LibraryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LibraryError::Validation(errors.into())
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Problems with the incoming proxy request itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::MissingParameter { .. } => "MISSING_PARAMETER",
            RequestError::InvalidParameter { .. } => "INVALID_PARAMETER",
        }
    }
}
