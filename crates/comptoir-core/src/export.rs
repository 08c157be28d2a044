//! # CSV Export
//!
//! Turns a collection into the CSV text offered for download from each
//! table view.
//!
//! ## Format
//! ```text
//! ID Vente,Date,ID Produit,Nom Produit,Quantité,Prix Unitaire,Total   ◄── header, unquoted
//! "V001","2023-11-01","P001","Laptop Pro","2","780000","1560000"       ◄── every field quoted
//! "V002","2023-11-02","P002","Monitor 4K","5","260000","1300000"
//! ```
//!
//! - Rows are joined with `\n`, no trailing newline
//! - A `"` inside a field is written as `\"`
//! - Amounts are raw francs, without grouping or symbol
//! - An empty collection exports nothing at all

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::store::RecordStore;
use crate::types::{ExpenseRecord, SaleRecord, StockItem};

pub const SALES_HEADERS: [&str; 7] = [
    "ID Vente",
    "Date",
    "ID Produit",
    "Nom Produit",
    "Quantité",
    "Prix Unitaire",
    "Total",
];

pub const EXPENSE_HEADERS: [&str; 5] = ["ID Dépense", "Date", "Catégorie", "Description", "Montant"];

pub const STOCK_HEADERS: [&str; 8] = [
    "ID Produit",
    "Nom Produit",
    "Catégorie",
    "Quantité",
    "Seuil Minimum",
    "Prix Achat",
    "Prix Vente",
    "Fournisseur",
];

/// A record that can be written as one CSV row.
///
/// Fields come back in declaration order, matching the header list of the
/// record's collection.
pub trait CsvRecord {
    fn csv_fields(&self) -> Vec<String>;
}

impl CsvRecord for SaleRecord {
    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            self.product_id.clone(),
            self.product_name.clone(),
            self.quantity.to_string(),
            self.unit_price.amount().to_string(),
            self.total.amount().to_string(),
        ]
    }
}

impl CsvRecord for ExpenseRecord {
    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            self.category.clone(),
            self.description.clone(),
            self.amount.amount().to_string(),
        ]
    }
}

impl CsvRecord for StockItem {
    fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.product_name.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            self.min_threshold.to_string(),
            self.purchase_cost.amount().to_string(),
            self.selling_price.amount().to_string(),
            self.supplier.clone(),
        ]
    }
}

fn csv_writer(buffer: Vec<u8>, quote_style: QuoteStyle) -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(quote_style)
        .double_quote(false)
        .escape(b'\\')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer)
}

/// Builds the CSV text for `records`, or `None` when there is nothing to
/// export.
pub fn export_csv<R: CsvRecord>(headers: &[&str], records: &[R]) -> CoreResult<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut header = csv_writer(Vec::new(), QuoteStyle::Never);
    header.write_record(headers)?;
    let buffer = header.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;

    let mut rows = csv_writer(buffer, QuoteStyle::Always);
    for record in records {
        rows.write_record(record.csv_fields())?;
    }
    let mut buffer = rows.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;

    // Rows are separated, not terminated.
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

/// Download name for an export: `{title in lower case, whitespace runs
/// replaced by _}_{YYYY-MM-DD}.csv`.
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let slug = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.csv", slug, date.format("%Y-%m-%d"))
}

// =============================================================================
// Collections
// =============================================================================

/// The exportable tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CsvCollection {
    Sales,
    Expenses,
    Stock,
}

impl CsvCollection {
    /// Table title, which also seeds the file name.
    pub fn title(&self) -> &'static str {
        match self {
            CsvCollection::Sales => "Historique des Ventes",
            CsvCollection::Expenses => "Liste des Dépenses",
            CsvCollection::Stock => "État du Stock",
        }
    }
}

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// Exports one collection of `store`, named after `today`.
///
/// Returns `None` when the collection is empty.
pub fn export_collection(
    store: &RecordStore,
    collection: CsvCollection,
    today: NaiveDate,
) -> CoreResult<Option<CsvExport>> {
    let content = match collection {
        CsvCollection::Sales => export_csv(&SALES_HEADERS, store.sales())?,
        CsvCollection::Expenses => export_csv(&EXPENSE_HEADERS, store.expenses())?,
        CsvCollection::Stock => export_csv(&STOCK_HEADERS, store.stock())?,
    };

    Ok(content.map(|content| CsvExport {
        file_name: export_file_name(collection.title(), today),
        content,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
