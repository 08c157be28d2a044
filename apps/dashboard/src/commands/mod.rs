//! # Commands Module
//!
//! All commands exposed to the dashboard front-end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports, shared DTOs)
//! ├── auth.rs       ◄─── login, logout, current_user
//! ├── dashboard.rs  ◄─── get_dashboard, get_activity
//! ├── sale.rs       ◄─── list_sales, add_sale, delete_sale
//! ├── expense.rs    ◄─── list_expenses, add_expense, delete_expense
//! ├── stock.rs      ◄─── list_stock, add/delete item, update_stock_quantity
//! ├── export.rs     ◄─── export_csv
//! ├── invoice.rs    ◄─── get_invoice
//! ├── sync.rs       ◄─── sync, get_sync_status
//! └── config.rs     ◄─── get_config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front-end writes one JSON line:                                        │
//! │    {"id": 7, "cmd": "add_expense", "args": {"amount": 12500}}           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ipc::dispatch ──► commands::expense::add_expense(&ledger, draft)       │
//! │         │              ◄── each command takes only the state it needs   │
//! │         ▼                                                               │
//! │  Result<T, ApiError> ──► {"id": 7, "ok": true, "data": {...}}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod invoice;
pub mod sale;
pub mod stock;
pub mod sync;

use comptoir_core::ActivityEntry;
use serde::Serialize;

/// Response of every mutation: the collection after the change, and the
/// activity entry it produced (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse<T> {
    pub items: Vec<T>,
    pub activity: Option<ActivityEntry>,
}
