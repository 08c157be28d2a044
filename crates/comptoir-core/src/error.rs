//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                       │
//! │  ├── CoreError        - Lookups that found nothing, CSV writer failures │
//! │  └── ValidationError  - Draft fields that break a record invariant      │
//! │                                                                         │
//! │  comptoir-session errors (separate crate)                               │
//! │  └── SessionError     - Session file failures                           │
//! │                                                                         │
//! │  Dashboard app errors                                                   │
//! │  └── ApiError         - What the front-end sees (serialized)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a record that does not exist is NOT an error anywhere in this
//! crate: it is a no-op on the collection.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale was requested by id (e.g. to print its invoice) and is absent.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The CSV writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised while turning a draft into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A supplied field is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Quantity, price, amount or threshold below zero.
    #[error("{field} must not be negative (got {value})")]
    MustBeNonNegative { field: String, value: i64 },

    /// A computed amount does not fit in the money range.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Duplicate value (e.g. an explicit id already in use).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
