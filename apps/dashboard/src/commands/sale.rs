//! # Sale Commands
//!
//! The sales journal table.

use comptoir_core::{Command, NewSale, SaleRecord};
use tracing::debug;

use super::MutationResponse;
use crate::error::ApiError;
use crate::state::LedgerState;

pub fn list_sales(ledger: &LedgerState) -> Vec<SaleRecord> {
    debug!("list_sales command");
    ledger.with_state(|state| state.store.sales().to_vec())
}

/// Records a sale. Omitted fields take the "new sale" defaults and the
/// total is always `quantity × unit_price`.
pub fn add_sale(
    ledger: &LedgerState,
    draft: NewSale,
) -> Result<MutationResponse<SaleRecord>, ApiError> {
    debug!(?draft, "add_sale command");
    let activity = ledger.apply(Command::AddSale(draft))?;
    Ok(MutationResponse {
        items: list_sales(ledger),
        activity,
    })
}

/// Deletes a sale. An unknown id still records the attempt in the feed.
pub fn delete_sale(
    ledger: &LedgerState,
    id: String,
) -> Result<MutationResponse<SaleRecord>, ApiError> {
    debug!(id = %id, "delete_sale command");
    let activity = ledger.apply(Command::DeleteSale { id })?;
    Ok(MutationResponse {
        items: list_sales(ledger),
        activity,
    })
}
