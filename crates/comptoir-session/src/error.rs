//! # Session Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (this module)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (dashboard app) ← SESSION_ERROR                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session file that fails to parse is NOT an error: loading discards it
//! and reports "nobody signed in".

use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session persistence failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading, writing or removing the session file failed.
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The signed-in user could not be encoded.
    #[error("Session serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No platform data directory and no explicit path.
    #[error("No session path available")]
    NoPath,
}
