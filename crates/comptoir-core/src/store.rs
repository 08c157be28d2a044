//! # Record Store
//!
//! The single source of truth for the three raw collections.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RecordStore Operations                               │
//! │                                                                         │
//! │  Collection   Create                 Delete (missing id = no-op)        │
//! │  ──────────   ──────                 ───────────────────────────        │
//! │  sales        add_sale(draft)        delete_sale(id)                    │
//! │  expenses     add_expense(draft)     delete_expense(id)                 │
//! │  stock        add_stock_item(draft)  delete_stock_item(id)              │
//! │                                                                         │
//! │  stock        update_stock_quantity(id, n) → n clamped to 0..=MAX       │
//! │                                                                         │
//! │  Every operation validates first and mutates second, so a rejected      │
//! │  draft leaves the collections untouched.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store knows nothing about the activity log; `state::AppState` pairs
//! the two.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ExpenseRecord, NewExpense, NewSale, NewStockItem, SaleRecord, StockItem};
use crate::validation::{validate_non_negative, validate_product_name};

// =============================================================================
// Defaults for new records
// =============================================================================

/// Id prefix of sales ("V" for vente).
pub const SALE_ID_PREFIX: &str = "V";
/// Id prefix of expenses ("D" for dépense).
pub const EXPENSE_ID_PREFIX: &str = "D";
/// Id prefix of stock items ("P" for produit).
pub const STOCK_ID_PREFIX: &str = "P";

const DEFAULT_SALE_PRODUCT_ID: &str = "P000";
const DEFAULT_SALE_PRODUCT_NAME: &str = "Nouveau Produit";
const DEFAULT_SALE_QUANTITY: i64 = 1;
const DEFAULT_SALE_UNIT_PRICE: Money = Money::new(50_000);

const DEFAULT_EXPENSE_CATEGORY: &str = "Autre";
const DEFAULT_EXPENSE_DESCRIPTION: &str = "Nouvelle dépense";
const DEFAULT_EXPENSE_AMOUNT: Money = Money::new(25_000);

const DEFAULT_STOCK_NAME: &str = "Nouveau Stock";
const DEFAULT_STOCK_CATEGORY: &str = "Divers";
const DEFAULT_STOCK_QUANTITY: i64 = 10;
const DEFAULT_STOCK_THRESHOLD: i64 = 5;
const DEFAULT_STOCK_COST: Money = Money::new(15_000);
const DEFAULT_STOCK_PRICE: Money = Money::new(20_000);
const DEFAULT_STOCK_SUPPLIER: &str = "Inconnu";

/// Largest quantity a stock item can hold. Requests above it are clamped
/// down, the same way negative requests are clamped up to zero.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000_000;

/// Outcome of a quantity update that actually changed the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub product_name: String,
    pub current: i64,
}

// =============================================================================
// Record Store
// =============================================================================

/// Owns the sales, expenses and stock collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStore {
    sales: Vec<SaleRecord>,
    expenses: Vec<ExpenseRecord>,
    stock: Vec<StockItem>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from existing collections, as-is.
    pub fn from_parts(
        sales: Vec<SaleRecord>,
        expenses: Vec<ExpenseRecord>,
        stock: Vec<StockItem>,
    ) -> Self {
        RecordStore {
            sales,
            expenses,
            stock,
        }
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn stock(&self) -> &[StockItem] {
        &self.stock
    }

    /// Looks up a sale by id.
    pub fn find_sale(&self, id: &str) -> Option<&SaleRecord> {
        self.sales.iter().find(|s| s.id == id)
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Appends a sale built from `draft`, filling omitted fields with the
    /// "new sale" defaults. `total` is always `quantity × unit_price`.
    pub fn add_sale(&mut self, draft: NewSale, today: NaiveDate) -> CoreResult<SaleRecord> {
        let id = match draft.id {
            Some(id) => ensure_free_id(id, self.sales.iter().map(|s| s.id.as_str()))?,
            None => next_id(SALE_ID_PREFIX, self.sales.iter().map(|s| s.id.as_str())),
        };

        let product_name = draft
            .product_name
            .unwrap_or_else(|| DEFAULT_SALE_PRODUCT_NAME.to_string());
        validate_product_name(&product_name)?;

        let quantity = draft.quantity.unwrap_or(DEFAULT_SALE_QUANTITY);
        validate_non_negative("quantity", quantity)?;

        let unit_price = draft.unit_price.unwrap_or(DEFAULT_SALE_UNIT_PRICE);
        validate_non_negative("unitPrice", unit_price.amount())?;

        let total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::TooLarge {
                field: "total".to_string(),
            })?;

        let sale = SaleRecord {
            id,
            date: draft.date.unwrap_or(today),
            product_id: draft
                .product_id
                .unwrap_or_else(|| DEFAULT_SALE_PRODUCT_ID.to_string()),
            product_name,
            quantity,
            unit_price,
            total,
        };

        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Removes the sale with `id`. Returns whether anything was removed.
    pub fn delete_sale(&mut self, id: &str) -> bool {
        let before = self.sales.len();
        self.sales.retain(|s| s.id != id);
        self.sales.len() != before
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    /// Appends an expense built from `draft`.
    pub fn add_expense(&mut self, draft: NewExpense, today: NaiveDate) -> CoreResult<ExpenseRecord> {
        let id = match draft.id {
            Some(id) => ensure_free_id(id, self.expenses.iter().map(|e| e.id.as_str()))?,
            None => next_id(EXPENSE_ID_PREFIX, self.expenses.iter().map(|e| e.id.as_str())),
        };

        let amount = draft.amount.unwrap_or(DEFAULT_EXPENSE_AMOUNT);
        validate_non_negative("amount", amount.amount())?;

        let expense = ExpenseRecord {
            id,
            date: draft.date.unwrap_or(today),
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_EXPENSE_CATEGORY.to_string()),
            description: draft
                .description
                .unwrap_or_else(|| DEFAULT_EXPENSE_DESCRIPTION.to_string()),
            amount,
        };

        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Removes the expense with `id`. Returns whether anything was removed.
    pub fn delete_expense(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() != before
    }

    // -------------------------------------------------------------------------
    // Stock
    // -------------------------------------------------------------------------

    /// Appends a stock item built from `draft`.
    ///
    /// A negative starting quantity is clamped to zero, like any other
    /// quantity update; negative prices and thresholds are rejected.
    pub fn add_stock_item(&mut self, draft: NewStockItem) -> CoreResult<StockItem> {
        let id = match draft.id {
            Some(id) => ensure_free_id(id, self.stock.iter().map(|i| i.id.as_str()))?,
            None => next_id(STOCK_ID_PREFIX, self.stock.iter().map(|i| i.id.as_str())),
        };

        let product_name = draft
            .product_name
            .unwrap_or_else(|| DEFAULT_STOCK_NAME.to_string());
        validate_product_name(&product_name)?;

        let min_threshold = draft.min_threshold.unwrap_or(DEFAULT_STOCK_THRESHOLD);
        validate_non_negative("minThreshold", min_threshold)?;

        let purchase_cost = draft.purchase_cost.unwrap_or(DEFAULT_STOCK_COST);
        validate_non_negative("purchaseCost", purchase_cost.amount())?;

        let selling_price = draft.selling_price.unwrap_or(DEFAULT_STOCK_PRICE);
        validate_non_negative("sellingPrice", selling_price.amount())?;

        let item = StockItem {
            id,
            product_name,
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_STOCK_CATEGORY.to_string()),
            quantity: clamp_stock_quantity(draft.quantity.unwrap_or(DEFAULT_STOCK_QUANTITY)),
            min_threshold,
            purchase_cost,
            selling_price,
            supplier: draft
                .supplier
                .unwrap_or_else(|| DEFAULT_STOCK_SUPPLIER.to_string()),
        };

        self.stock.push(item.clone());
        Ok(item)
    }

    /// Removes the stock item with `id`. Returns whether anything was removed.
    pub fn delete_stock_item(&mut self, id: &str) -> bool {
        let before = self.stock.len();
        self.stock.retain(|i| i.id != id);
        self.stock.len() != before
    }

    /// Sets the quantity of item `id` to `requested` clamped into
    /// `0..=MAX_STOCK_QUANTITY`.
    ///
    /// Returns `None` when the item does not exist or the stored value is
    /// already the clamped target.
    pub fn update_stock_quantity(&mut self, id: &str, requested: i64) -> Option<QuantityChange> {
        let item = self.stock.iter_mut().find(|i| i.id == id)?;
        let clamped = clamp_stock_quantity(requested);

        if item.quantity == clamped {
            return None;
        }

        item.quantity = clamped;

        Some(QuantityChange {
            product_name: item.product_name.clone(),
            current: clamped,
        })
    }
}

fn clamp_stock_quantity(requested: i64) -> i64 {
    requested.clamp(0, MAX_STOCK_QUANTITY)
}

/// Trims an explicitly supplied id and checks it is non-empty and unused.
fn ensure_free_id<'a>(id: String, mut existing: impl Iterator<Item = &'a str>) -> CoreResult<String> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        }
        .into());
    }
    if existing.any(|taken| taken == id) {
        return Err(ValidationError::Duplicate {
            field: "id".to_string(),
            value: id,
        }
        .into());
    }
    Ok(id)
}

/// Next id in a prefixed series: one past the highest numeric suffix in use,
/// zero-padded to three digits (`V001`, `V002`, ... `V1000`).
///
/// Ids that do not follow the `prefix + digits` shape are ignored, and gaps
/// left by deletions are never reused.
pub fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", prefix, highest + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_add_sale_defaults() {
        let mut store = RecordStore::new();
        let sale = store.add_sale(NewSale::default(), today()).unwrap();

        assert_eq!(sale.id, "V001");
        assert_eq!(sale.date, today());
        assert_eq!(sale.product_id, "P000");
        assert_eq!(sale.product_name, "Nouveau Produit");
        assert_eq!(sale.quantity, 1);
        assert_eq!(sale.unit_price, Money::new(50_000));
        assert_eq!(sale.total, Money::new(50_000));
        assert_eq!(store.sales().len(), 1);
    }

    #[test]
    fn test_add_sale_computes_total() {
        let mut store = RecordStore::new();
        let draft = NewSale {
            quantity: Some(5),
            unit_price: Some(Money::new(260_000)),
            ..NewSale::default()
        };
        let sale = store.add_sale(draft, today()).unwrap();
        assert_eq!(sale.total, Money::new(1_300_000));
    }

    #[test]
    fn test_add_sale_rejects_negative_quantity() {
        let mut store = RecordStore::new();
        let draft = NewSale {
            quantity: Some(-1),
            ..NewSale::default()
        };
        let err = store.add_sale(draft, today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(store.sales().is_empty());
    }

    #[test]
    fn test_explicit_duplicate_id_rejected() {
        let mut store = RecordStore::new();
        store.add_expense(NewExpense::default(), today()).unwrap();

        let draft = NewExpense {
            id: Some("D001".to_string()),
            ..NewExpense::default()
        };
        let err = store.add_expense(draft, today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(store.expenses().len(), 1);
    }

    #[test]
    fn test_ids_do_not_collide_after_delete() {
        let mut store = RecordStore::new();
        for _ in 0..3 {
            store.add_sale(NewSale::default(), today()).unwrap();
        }
        assert!(store.delete_sale("V002"));

        let sale = store.add_sale(NewSale::default(), today()).unwrap();
        assert_eq!(sale.id, "V004");
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id("P", std::iter::empty()), "P001");
        assert_eq!(next_id("P", ["P001", "P004", "X9"].into_iter()), "P005");
        assert_eq!(next_id("V", ["V999"].into_iter()), "V1000");
        assert_eq!(next_id("D", ["Dx", "D"].into_iter()), "D001");
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = RecordStore::new();
        store.add_sale(NewSale::default(), today()).unwrap();
        let before = store.clone();

        assert!(!store.delete_sale("V999"));
        assert!(!store.delete_expense("D999"));
        assert!(!store.delete_stock_item("P999"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_stock_item_defaults_and_clamp() {
        let mut store = RecordStore::new();
        let item = store.add_stock_item(NewStockItem::default()).unwrap();
        assert_eq!(item.id, "P001");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.min_threshold, 5);
        assert_eq!(item.supplier, "Inconnu");

        let draft = NewStockItem {
            quantity: Some(-7),
            ..NewStockItem::default()
        };
        assert_eq!(store.add_stock_item(draft).unwrap().quantity, 0);
    }

    #[test]
    fn test_update_stock_quantity_clamps_negative() {
        let mut store = RecordStore::new();
        store.add_stock_item(NewStockItem::default()).unwrap();

        let change = store.update_stock_quantity("P001", -4).unwrap();
        assert_eq!(change.current, 0);
        assert_eq!(store.stock()[0].quantity, 0);
    }

    #[test]
    fn test_add_sale_rejects_overflowing_total() {
        let mut store = RecordStore::new();
        let draft = NewSale {
            quantity: Some(i64::MAX),
            unit_price: Some(Money::new(2)),
            ..NewSale::default()
        };

        let err = store.add_sale(draft, today()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooLarge { .. })
        ));
        assert!(store.sales().is_empty());
    }

    #[test]
    fn test_stock_quantity_capped_at_maximum() {
        let mut store = RecordStore::new();
        let draft = NewStockItem {
            quantity: Some(i64::MAX),
            ..NewStockItem::default()
        };
        assert_eq!(store.add_stock_item(draft).unwrap().quantity, MAX_STOCK_QUANTITY);

        store.update_stock_quantity("P001", 0).unwrap();
        let change = store.update_stock_quantity("P001", i64::MAX).unwrap();
        assert_eq!(change.current, MAX_STOCK_QUANTITY);
    }

    #[test]
    fn test_update_stock_quantity_unchanged_or_missing() {
        let mut store = RecordStore::new();
        store.add_stock_item(NewStockItem::default()).unwrap();

        assert!(store.update_stock_quantity("P001", 10).is_none());
        assert!(store.update_stock_quantity("P999", 3).is_none());

        store.update_stock_quantity("P001", 0).unwrap();
        // Already 0: a negative request clamps to the same value.
        assert!(store.update_stock_quantity("P001", -2).is_none());
    }
}
