//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comptoir                               │
//! │                                                                         │
//! │  {"cmd": "get_invoice", "args": {"saleId": "V999"}}                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  ->  Result<T, ApiError>                       │  │
//! │  │                                                                  │  │
//! │  │  CoreError::SaleNotFound ──────────► NOT_FOUND                   │  │
//! │  │  CoreError::Validation ────────────► VALIDATION_ERROR            │  │
//! │  │  SessionError ─────────────────────► SESSION_ERROR               │  │
//! │  │  no signed-in user ────────────────► UNAUTHENTICATED             │  │
//! │  │  second concurrent sync ───────────► SYNC_IN_PROGRESS            │  │
//! │  │  undecodable request ──────────────► BAD_REQUEST                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  {"ok": false, "error": {"code": "NOT_FOUND",                           │
//! │                          "message": "Sale not found: V999"}}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comptoir_core::CoreError;
use comptoir_session::SessionError;
use serde::Serialize;

/// API error returned from dashboard commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced record does not exist
    NotFound,

    /// Draft rejected by validation
    ValidationError,

    /// Command needs a signed-in user
    Unauthenticated,

    /// A sync is already running
    SyncInProgress,

    /// Session file could not be written or removed
    SessionError,

    /// Request line could not be decoded
    BadRequest,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Sign in required")
    }

    pub fn sync_in_progress() -> Self {
        ApiError::new(ErrorCode::SyncInProgress, "A sync is already running")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SaleNotFound(id) => ApiError::not_found("Sale", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Csv(e) => ApiError::internal(e.to_string()),
        }
    }
}

/// Converts session errors to API errors.
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        // Details go to the log; the front-end gets a fixed message.
        tracing::error!("Session persistence failed: {}", err);
        ApiError::new(ErrorCode::SessionError, "Session could not be saved")
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Response encoding failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
