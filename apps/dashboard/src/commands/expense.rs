//! # Expense Commands

use comptoir_core::{Command, ExpenseRecord, NewExpense};
use tracing::debug;

use super::MutationResponse;
use crate::error::ApiError;
use crate::state::LedgerState;

pub fn list_expenses(ledger: &LedgerState) -> Vec<ExpenseRecord> {
    debug!("list_expenses command");
    ledger.with_state(|state| state.store.expenses().to_vec())
}

pub fn add_expense(
    ledger: &LedgerState,
    draft: NewExpense,
) -> Result<MutationResponse<ExpenseRecord>, ApiError> {
    debug!(?draft, "add_expense command");
    let activity = ledger.apply(Command::AddExpense(draft))?;
    Ok(MutationResponse {
        items: list_expenses(ledger),
        activity,
    })
}

pub fn delete_expense(
    ledger: &LedgerState,
    id: String,
) -> Result<MutationResponse<ExpenseRecord>, ApiError> {
    debug!(id = %id, "delete_expense command");
    let activity = ledger.apply(Command::DeleteExpense { id })?;
    Ok(MutationResponse {
        items: list_expenses(ledger),
        activity,
    })
}
