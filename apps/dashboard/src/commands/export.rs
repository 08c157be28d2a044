//! # Export Commands

use chrono::Utc;
use comptoir_core::export::{export_collection, CsvCollection, CsvExport};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;

/// CSV text and download name for a table, or `null` when the table is
/// empty (the front-end then offers no download).
pub fn export_csv(
    ledger: &LedgerState,
    collection: CsvCollection,
) -> Result<Option<CsvExport>, ApiError> {
    debug!(?collection, "export_csv command");
    let today = Utc::now().date_naive();

    let export = ledger.with_state(|state| export_collection(&state.store, collection, today))?;
    if let Some(export) = &export {
        info!(file_name = %export.file_name, "CSV export prepared");
    }
    Ok(export)
}
