//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The franc CFA (XAF / XOF) has no minor unit in everyday use, so the    │
//! │  smallest unit IS the franc:                                            │
//! │    780 000 FCFA × 2 = 1 560 000 FCFA, exactly                           │
//! │                                                                         │
//! │  Every KPI is a sum of products of integers: no rounding policy needed. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::money::Money;
//!
//! let price = Money::new(780_000);
//!
//! let line_total = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line_total.amount(), 1_560_000);
//! assert_eq!(line_total.to_string(), "1 560 000 FCFA");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (whole francs for XAF).
///
/// ## Design Decisions
/// - **i64 (signed)**: estimated profit can be negative
/// - **Newtype**: serializes as a bare number, matching the front-end's
///   `number` fields
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  SaleRecord.unit_price × quantity ──► SaleRecord.total ──► revenue      │
/// │  ExpenseRecord.amount ─────────────────────────────────► expenses       │
/// │  StockItem.purchase_cost × quantity ───────────────────► stock value    │
/// │                                                                         │
/// │  revenue − expenses ──► estimated profit                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an amount in the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let rent = Money::new(980_000);
    /// assert_eq!(rent.amount(), 980_000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount in the smallest currency unit.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let unit_price = Money::new(260_000);
    /// assert_eq!(unit_price.checked_multiply_quantity(5), Some(Money::new(1_300_000)));
    /// assert_eq!(Money::new(2).checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, clamping at the `i64` bounds.
    #[inline]
    pub const fn saturating_multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates tax with integer rounding: `(amount * bps + 5000) / 10000`.
    ///
    /// Invoices currently carry a zero rate, so this always yields zero in
    /// practice; the computation is kept general so a real VAT rate only
    /// needs a configuration change.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::money::Money;
    /// use comptoir_core::types::TaxRate;
    ///
    /// let total = Money::new(1_560_000);
    /// assert!(total.calculate_tax(TaxRate::zero()).is_zero());
    /// assert_eq!(total.calculate_tax(TaxRate::from_bps(1925)).amount(), 300_300);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large totals cannot overflow before the division
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::new(tax as i64)
    }
}

/// Formats an integer with a space every three digits: `1560000` → `1 560 000`.
///
/// This is the grouping French-speaking merchants expect on receipts and in
/// spreadsheets.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount grouped by thousands followed by the currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", group_thousands(self.0), CURRENCY_SYMBOL)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Addition and subtraction saturate.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
