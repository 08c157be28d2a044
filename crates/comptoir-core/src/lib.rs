//! # comptoir-core: Pure Business Logic for the Comptoir Dashboard
//!
//! This crate holds the bookkeeping engine behind the dashboard: the raw
//! sales, expense and stock records, everything derived from them, and the
//! activity feed that narrates each change. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Comptoir Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard front-end                          │   │
//! │  │    KPI cards ──► Sales table ──► Expenses ──► Inventory         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines IPC                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 comptoir-dashboard commands                     │   │
//! │  │    get_dashboard, add_sale, update_stock_quantity, sync, ...    │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────┐  ┌────────▼───────────────┐   │
//! │  │     ★ comptoir-core (THIS CRATE) ★  │  │   comptoir-session     │   │
//! │  │                                     │  │  auth stub, session    │   │
//! │  │  store ─► state ─► activity         │  │  file (tokio fs)       │   │
//! │  │    │                                │  └────────────────────────┘   │
//! │  │    └──► metrics, filter,            │                               │
//! │  │         export, invoice             │                               │
//! │  │                                     │                               │
//! │  │  NO I/O • NO TIMERS • PURE          │                               │
//! │  └─────────────────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records, drafts, derived value types
//! - [`money`] - Whole-franc `Money` type
//! - [`store`] - The three record collections and their mutations
//! - [`state`] - `AppState` + `Command`: store and activity log in one step
//! - [`activity`] - Bounded most-recent-first activity log
//! - [`metrics`] - KPIs, stock health counts, dashboard snapshot
//! - [`filter`] - Inventory search
//! - [`export`] - CSV export
//! - [`invoice`] - Per-sale invoice
//! - [`seed`] - Demo shop data
//! - [`validation`] - Draft checks and lenient quantity parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use comptoir_core::state::{AppState, Command};
//! use comptoir_core::validation::QuantityInput;
//!
//! let state = AppState::demo();
//! let (state, logged) = state.apply(Command::UpdateStockQuantity {
//!     id: "P002".to_string(),
//!     quantity: QuantityInput::from(-4),
//! });
//!
//! assert_eq!(state.store.stock()[1].quantity, 0);
//! assert_eq!(
//!     logged.unwrap().unwrap().message,
//!     "Mise à jour inventaire : Monitor 4K (0)"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod activity;
pub mod error;
pub mod export;
pub mod filter;
pub mod invoice;
pub mod metrics;
pub mod money;
pub mod seed;
pub mod state;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use metrics::DashboardSnapshot;
pub use money::Money;
pub use state::{AppState, Command};
pub use store::RecordStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Symbol appended to every displayed amount (Central African CFA franc).
pub const CURRENCY_SYMBOL: &str = "FCFA";

/// ISO 4217 code of the currency amounts are kept in.
pub const CURRENCY_CODE: &str = "XAF";

/// Number of entries the activity feed retains.
pub const ACTIVITY_LOG_CAPACITY: usize = 10;

/// Replaces the leading `V` of a sale id to form its invoice number.
pub const INVOICE_NUMBER_PREFIX: &str = "INV-2023-";
