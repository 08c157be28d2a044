//! # Domain Types
//!
//! Core domain types used throughout Comptoir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Raw records (owned by the RecordStore)                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │  ExpenseRecord  │   │    StockItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id  "V001"     │   │  id  "D001"     │   │  id  "P001"     │       │
//! │  │  quantity       │   │  category       │   │  quantity       │       │
//! │  │  unit_price     │   │  amount         │   │  min_threshold  │       │
//! │  │  total          │   │                 │   │  purchase_cost  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Derived values (recomputed on every request, never stored)             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DashboardKpis  │   │   StockStats    │   │   StockHealth   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire format is camelCase so the dashboard front-end can consume the
//! generated TypeScript bindings unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%. Invoices are issued at the zero rate; the type
/// exists so the "TVA" line is computed rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of the sales journal.
///
/// `total` is fixed when the record is created (`quantity × unit_price`) and
/// is what revenue sums over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

// =============================================================================
// Expense
// =============================================================================

/// One line of the expense journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Free-text label ("Loyer", "Salaires", ...).
    pub category: String,
    pub description: String,
    pub amount: Money,
}

// =============================================================================
// Stock
// =============================================================================

/// A product held in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockItem {
    pub id: String,
    pub product_name: String,
    pub category: String,
    /// Units on hand. Never negative once stored.
    pub quantity: i64,
    /// At or below this level the item is reported as low stock.
    pub min_threshold: i64,
    /// Cost per unit; stock value is `quantity × purchase_cost`.
    pub purchase_cost: Money,
    pub selling_price: Money,
    pub supplier: String,
}

impl StockItem {
    /// Classifies the item against its threshold.
    ///
    /// ```text
    ///   quantity <= 0                    → OutOfStock
    ///   0 < quantity <= min_threshold    → Low
    ///   quantity >  min_threshold        → Healthy
    /// ```
    ///
    /// An item sitting exactly on its threshold is `Low`.
    pub fn health(&self) -> StockHealth {
        if self.quantity <= 0 {
            StockHealth::OutOfStock
        } else if self.quantity <= self.min_threshold {
            StockHealth::Low
        } else {
            StockHealth::Healthy
        }
    }

    /// Value of the units on hand at purchase cost.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.purchase_cost.saturating_multiply_quantity(self.quantity)
    }

    /// True when the item belongs on the dashboard's critical list.
    #[inline]
    pub fn needs_attention(&self) -> bool {
        self.quantity <= self.min_threshold
    }
}

/// Health class of a stock item. The three classes are disjoint and cover
/// every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockHealth {
    OutOfStock,
    Low,
    Healthy,
}

// =============================================================================
// Derived Values
// =============================================================================

/// Headline figures shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardKpis {
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub stock_value: Money,
    pub estimated_profit: Money,
}

/// Counts of stock items per health class plus total units on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockStats {
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub healthy_stock: usize,
    pub total_items: i64,
}

impl StockStats {
    /// Number of items counted across the three classes.
    pub fn item_count(&self) -> usize {
        self.out_of_stock + self.low_stock + self.healthy_stock
    }
}

/// Revenue and volume for one product name, used for the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRevenue {
    pub product_name: String,
    pub quantity: i64,
    pub revenue: Money,
}

// =============================================================================
// User
// =============================================================================

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// =============================================================================
// Drafts
// =============================================================================

/// Fields supplied when recording a sale. Anything omitted falls back to
/// the "new sale" defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct NewSale {
    pub id: Option<String>,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<Money>,
}

/// Fields supplied when recording an expense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct NewExpense {
    pub id: Option<String>,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
}

/// Fields supplied when adding a product to inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct NewStockItem {
    pub id: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub min_threshold: Option<i64>,
    pub purchase_cost: Option<Money>,
    pub selling_price: Option<Money>,
    pub supplier: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
