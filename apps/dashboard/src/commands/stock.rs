//! # Stock Commands
//!
//! The inventory table, its search box and the inline quantity editor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ access           ]  ◄── list_stock { search: "access" }              │
//! │                                                                         │
//! │  P003  Clavier Mécanique   Accessoires   [  0 ]  ◄── update_stock_      │
//! │  P004  Souris Sans Fil     Accessoires   [ 45 ]      quantity           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use comptoir_core::filter::filter_stock;
use comptoir_core::validation::QuantityInput;
use comptoir_core::{Command, NewStockItem, StockItem};
use tracing::debug;

use super::MutationResponse;
use crate::error::ApiError;
use crate::state::LedgerState;

/// Inventory, optionally narrowed to items whose name or category
/// contains `search` (case-insensitive).
pub fn list_stock(ledger: &LedgerState, search: Option<String>) -> Vec<StockItem> {
    debug!(search = ?search, "list_stock command");
    let term = search.unwrap_or_default();
    ledger.with_state(|state| {
        filter_stock(state.store.stock(), &term)
            .into_iter()
            .cloned()
            .collect()
    })
}

pub fn add_stock_item(
    ledger: &LedgerState,
    draft: NewStockItem,
) -> Result<MutationResponse<StockItem>, ApiError> {
    debug!(?draft, "add_stock_item command");
    let activity = ledger.apply(Command::AddStockItem(draft))?;
    Ok(MutationResponse {
        items: list_stock(ledger, None),
        activity,
    })
}

pub fn delete_stock_item(
    ledger: &LedgerState,
    id: String,
) -> Result<MutationResponse<StockItem>, ApiError> {
    debug!(id = %id, "delete_stock_item command");
    let activity = ledger.apply(Command::DeleteStockItem { id })?;
    Ok(MutationResponse {
        items: list_stock(ledger, None),
        activity,
    })
}

/// Sets an item's quantity. Negative input is stored as 0, text that is not
/// a number counts as 0, and an unknown id changes nothing.
pub fn update_stock_quantity(
    ledger: &LedgerState,
    id: String,
    quantity: QuantityInput,
) -> Result<MutationResponse<StockItem>, ApiError> {
    debug!(id = %id, ?quantity, "update_stock_quantity command");
    let activity = ledger.apply(Command::UpdateStockQuantity { id, quantity })?;
    Ok(MutationResponse {
        items: list_stock(ledger, None),
        activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_stock_search() {
        let ledger = LedgerState::default();

        let all = list_stock(&ledger, None);
        assert_eq!(all.len(), 4);

        let found = list_stock(&ledger, Some("ACCESS".to_string()));
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["P003", "P004"]);
    }

    #[test]
    fn test_update_from_text() {
        let ledger = LedgerState::default();

        let response =
            update_stock_quantity(&ledger, "P003".to_string(), QuantityInput::from("12")).unwrap();

        assert_eq!(response.items[2].quantity, 12);
        assert_eq!(
            response.activity.unwrap().message,
            "Mise à jour inventaire : Clavier Mécanique (12)"
        );
    }
}
