//! # Seed Data
//!
//! The demonstration shop the dashboard opens with: a few laptops and
//! monitors sold, rent and salaries paid, and an inventory that shows all
//! three stock-health classes at once.
//!
//! ```text
//!   P001 Laptop Pro          15 / min 5    healthy
//!   P002 Monitor 4K           3 / min 5    low
//!   P003 Clavier Mécanique    0 / min 10   out of stock
//!   P004 Souris Sans Fil     45 / min 10   healthy
//! ```

use chrono::NaiveDate;

use crate::money::Money;
use crate::store::RecordStore;
use crate::types::{ExpenseRecord, SaleRecord, StockItem};

/// Message recorded when a fresh dashboard state is created.
pub const STARTUP_MESSAGE: &str = "Système initialisé avec succès";

fn nov_2023(day: u32) -> NaiveDate {
    // Every day used below exists in November 2023.
    NaiveDate::from_ymd_opt(2023, 11, day).unwrap_or_default()
}

fn sale(id: &str, day: u32, product_id: &str, name: &str, quantity: i64, unit_price: i64) -> SaleRecord {
    let unit_price = Money::new(unit_price);
    SaleRecord {
        id: id.to_string(),
        date: nov_2023(day),
        product_id: product_id.to_string(),
        product_name: name.to_string(),
        quantity,
        unit_price,
        total: unit_price.saturating_multiply_quantity(quantity),
    }
}

fn expense(id: &str, day: u32, category: &str, description: &str, amount: i64) -> ExpenseRecord {
    ExpenseRecord {
        id: id.to_string(),
        date: nov_2023(day),
        category: category.to_string(),
        description: description.to_string(),
        amount: Money::new(amount),
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    quantity: i64,
    min_threshold: i64,
    purchase_cost: i64,
    selling_price: i64,
    supplier: &str,
) -> StockItem {
    StockItem {
        id: id.to_string(),
        product_name: name.to_string(),
        category: category.to_string(),
        quantity,
        min_threshold,
        purchase_cost: Money::new(purchase_cost),
        selling_price: Money::new(selling_price),
        supplier: supplier.to_string(),
    }
}

/// Sales journal of the demo shop.
pub fn demo_sales() -> Vec<SaleRecord> {
    vec![
        sale("V001", 1, "P001", "Laptop Pro", 2, 780_000),
        sale("V002", 2, "P002", "Monitor 4K", 5, 260_000),
        sale("V003", 5, "P001", "Laptop Pro", 1, 780_000),
    ]
}

/// Expense journal of the demo shop.
pub fn demo_expenses() -> Vec<ExpenseRecord> {
    vec![
        expense("D001", 1, "Loyer", "Bureau Central", 980_000),
        expense("D002", 10, "Salaires", "Équipe Ventes", 1_960_000),
        expense("D003", 15, "Achat stock", "Nouvelle Commande P001", 520_000),
    ]
}

/// Inventory of the demo shop.
pub fn demo_stock() -> Vec<StockItem> {
    vec![
        item("P001", "Laptop Pro", "Informatique", 15, 5, 520_000, 780_000, "TechCorp"),
        item("P002", "Monitor 4K", "Informatique", 3, 5, 162_500, 260_000, "Display Solutions"),
        item("P003", "Clavier Mécanique", "Accessoires", 0, 10, 29_250, 45_000, "Peripherals Ltd"),
        item("P004", "Souris Sans Fil", "Accessoires", 45, 10, 15_000, 25_000, "Peripherals Ltd"),
    ]
}

/// A store holding all demo collections.
pub fn demo_store() -> RecordStore {
    RecordStore::from_parts(demo_sales(), demo_expenses(), demo_stock())
}
