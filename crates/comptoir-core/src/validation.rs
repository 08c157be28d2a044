//! # Validation Module
//!
//! Input validation utilities for Comptoir.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end form                                                │
//! │  └── Free text typed into number fields                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                                │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: record invariants + lenient quantity parsing          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: RecordStore                                                   │
//! │  └── Quantity clamped to 0..=MAX_STOCK_QUANTITY on every stock update   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::validation::{parse_quantity_input, validate_non_negative};
//!
//! assert_eq!(parse_quantity_input("12"), 12);
//! assert_eq!(parse_quantity_input("douze"), 0);
//!
//! assert!(validate_non_negative("quantity", 3).is_ok());
//! assert!(validate_non_negative("quantity", -1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use comptoir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Laptop Pro").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "productName".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "productName".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Rejects negative quantities, prices, amounts and thresholds.
///
/// Zero is allowed everywhere (free items, empty shelves).
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

// =============================================================================
// Quantity Input
// =============================================================================

/// Raw quantity as received from an inventory form.
///
/// The inventory screen sends whatever the operator typed. Numbers are
/// taken as-is (fractions truncated), text is parsed leniently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum QuantityInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl QuantityInput {
    /// Resolves the input to an integer. Non-numeric input resolves to 0.
    ///
    /// Clamping to zero is the store's job, so negatives pass through here.
    pub fn resolve(&self) -> i64 {
        match self {
            QuantityInput::Integer(n) => *n,
            QuantityInput::Float(f) if f.is_finite() => f.trunc() as i64,
            QuantityInput::Float(_) => 0,
            QuantityInput::Text(text) => parse_quantity_input(text),
        }
    }
}

impl From<i64> for QuantityInput {
    fn from(value: i64) -> Self {
        QuantityInput::Integer(value)
    }
}

impl From<&str> for QuantityInput {
    fn from(value: &str) -> Self {
        QuantityInput::Text(value.to_string())
    }
}

/// Parses a typed quantity the way a number form field does.
///
/// ## Rules
/// - Leading/trailing whitespace ignored
/// - Optional `+` / `-` sign
/// - Leading decimal digits are read; parsing stops at the first other char
/// - No digits at all → 0
/// - Overflow saturates at `i64::MAX` / `i64::MIN`
///
/// ## Example
/// ```rust
/// use comptoir_core::validation::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input(" 42 "), 42);
/// assert_eq!(parse_quantity_input("7 cartons"), 7);
/// assert_eq!(parse_quantity_input("-3"), -3);
/// assert_eq!(parse_quantity_input(""), 0);
/// ```
pub fn parse_quantity_input(text: &str) -> i64 {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        value.saturating_neg()
    } else {
        value
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
