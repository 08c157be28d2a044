//! # Application State
//!
//! Pairs the [`RecordStore`] with the [`ActivityLog`] and applies mutations
//! to both as one step.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   AppState ──► apply(Command) ──► (AppState', Result<Option<Entry>>)    │
//! │                    │                                                    │
//! │                    ├── store mutation fails ─► state returned as-is     │
//! │                    │                            Err(CoreError)          │
//! │                    │                                                    │
//! │                    └── store mutation ok ────► at most one entry        │
//! │                                                prepended to the log     │
//! │                                                                         │
//! │   The state is taken and returned by value: no global, no hidden        │
//! │   aliasing. Callers holding it behind a lock swap it out and back in.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging Rules
//! | Command               | Kind    | Message                                  |
//! |-----------------------|---------|------------------------------------------|
//! | AddSale               | sale    | `Vente ajoutée : {id} ({total})`         |
//! | DeleteSale            | sale    | `Vente supprimée : {id}` (even if absent)|
//! | AddExpense            | expense | `Dépense enregistrée : {cat} ({amount})` |
//! | DeleteExpense         | expense | `Dépense supprimée : {id}` (even if absent)|
//! | AddStockItem          | -       | -                                        |
//! | DeleteStockItem       | -       | -                                        |
//! | UpdateStockQuantity   | stock   | `Mise à jour inventaire : {name} ({n})`  |
//! |                       |         | only when the stored value changed       |

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::{ActivityEntry, ActivityKind, ActivityLog};
use crate::error::CoreResult;
use crate::metrics::DashboardSnapshot;
use crate::seed::{demo_store, STARTUP_MESSAGE};
use crate::store::RecordStore;
use crate::types::{NewExpense, NewSale, NewStockItem};
use crate::validation::QuantityInput;

/// A mutation request against the dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddSale(NewSale),
    DeleteSale { id: String },
    AddExpense(NewExpense),
    DeleteExpense { id: String },
    AddStockItem(NewStockItem),
    DeleteStockItem { id: String },
    UpdateStockQuantity { id: String, quantity: QuantityInput },
}

/// Records plus the activity feed that narrates changes to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub store: RecordStore,
    pub activity: ActivityLog,
}

impl AppState {
    /// Wraps an existing store with an empty activity log.
    pub fn new(store: RecordStore) -> Self {
        AppState {
            store,
            activity: ActivityLog::new(),
        }
    }

    /// The demo shop, with the startup entry already in the feed.
    pub fn demo() -> Self {
        let mut state = AppState::new(demo_store());
        state.record_system(STARTUP_MESSAGE);
        state
    }

    /// Applies `command` stamped with the current time.
    pub fn apply(self, command: Command) -> (AppState, CoreResult<Option<ActivityEntry>>) {
        self.apply_at(command, Utc::now())
    }

    /// Applies `command` as if it happened at `now`.
    ///
    /// `now` stamps the activity entry and, in UTC, supplies the default date
    /// of new sales and expenses.
    pub fn apply_at(
        mut self,
        command: Command,
        now: DateTime<Utc>,
    ) -> (AppState, CoreResult<Option<ActivityEntry>>) {
        let outcome = self.execute(command, now);
        (self, outcome)
    }

    fn execute(&mut self, command: Command, now: DateTime<Utc>) -> CoreResult<Option<ActivityEntry>> {
        let today = now.date_naive();

        let logged = match command {
            Command::AddSale(draft) => {
                let sale = self.store.add_sale(draft, today)?;
                Some((
                    ActivityKind::Sale,
                    format!("Vente ajoutée : {} ({})", sale.id, sale.total),
                ))
            }
            Command::DeleteSale { id } => {
                self.store.delete_sale(&id);
                Some((ActivityKind::Sale, format!("Vente supprimée : {}", id)))
            }
            Command::AddExpense(draft) => {
                let expense = self.store.add_expense(draft, today)?;
                Some((
                    ActivityKind::Expense,
                    format!(
                        "Dépense enregistrée : {} ({})",
                        expense.category, expense.amount
                    ),
                ))
            }
            Command::DeleteExpense { id } => {
                self.store.delete_expense(&id);
                Some((ActivityKind::Expense, format!("Dépense supprimée : {}", id)))
            }
            Command::AddStockItem(draft) => {
                self.store.add_stock_item(draft)?;
                None
            }
            Command::DeleteStockItem { id } => {
                self.store.delete_stock_item(&id);
                None
            }
            Command::UpdateStockQuantity { id, quantity } => self
                .store
                .update_stock_quantity(&id, quantity.resolve())
                .map(|change| {
                    (
                        ActivityKind::Stock,
                        format!(
                            "Mise à jour inventaire : {} ({})",
                            change.product_name, change.current
                        ),
                    )
                }),
        };

        Ok(logged.map(|(kind, message)| self.activity.record_at(kind, message, now)))
    }

    /// Records a system event (login, sync) in the activity feed.
    pub fn record_system(&mut self, message: impl Into<String>) -> ActivityEntry {
        self.activity.record(ActivityKind::System, message)
    }

    /// Everything the dashboard view needs, computed from the current state.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::build(&self.store, self.activity.to_vec())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::money::Money;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn messages(state: &AppState) -> Vec<String> {
        state.activity.entries().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn test_demo_starts_with_startup_entry() {
        let state = AppState::demo();
        assert_eq!(state.activity.len(), 1);
        let entry = state.activity.latest().unwrap();
        assert_eq!(entry.kind, ActivityKind::System);
        assert_eq!(entry.message, "Système initialisé avec succès");
        assert_eq!(state.store.sales().len(), 3);
        assert_eq!(state.store.expenses().len(), 3);
        assert_eq!(state.store.stock().len(), 4);
    }

    #[test]
    fn test_add_sale_logs_total() {
        let state = AppState::demo();
        let draft = NewSale {
            quantity: Some(2),
            unit_price: Some(Money::new(780_000)),
            ..NewSale::default()
        };

        let (state, outcome) = state.apply_at(Command::AddSale(draft), at("2024-01-20T23:30:00Z"));
        let entry = outcome.unwrap().unwrap();

        assert_eq!(entry.kind, ActivityKind::Sale);
        assert_eq!(entry.message, "Vente ajoutée : V004 (1 560 000 FCFA)");
        let sale = state.store.find_sale("V004").unwrap();
        assert_eq!(sale.date.to_string(), "2024-01-20");
    }

    #[test]
    fn test_delete_missing_sale_still_logs_attempt() {
        let state = AppState::demo();
        let sales_before = state.store.sales().to_vec();

        let (state, outcome) = state.apply(Command::DeleteSale {
            id: "V999".to_string(),
        });

        assert_eq!(outcome.unwrap().unwrap().message, "Vente supprimée : V999");
        assert_eq!(state.store.sales(), sales_before.as_slice());
        assert_eq!(state.activity.len(), 2);
    }

    #[test]
    fn test_expense_add_and_delete_messages() {
        let state = AppState::demo();
        let draft = NewExpense {
            category: Some("Transport".to_string()),
            amount: Some(Money::new(12_500)),
            ..NewExpense::default()
        };

        let (state, _) = state.apply(Command::AddExpense(draft));
        let (state, _) = state.apply(Command::DeleteExpense {
            id: "D001".to_string(),
        });

        assert_eq!(
            messages(&state)[..2],
            [
                "Dépense supprimée : D001".to_string(),
                "Dépense enregistrée : Transport (12 500 FCFA)".to_string(),
            ]
        );
        assert_eq!(state.store.expenses().len(), 3);
    }

    #[test]
    fn test_stock_add_and_delete_are_silent() {
        let state = AppState::demo();

        let (state, added) = state.apply(Command::AddStockItem(NewStockItem::default()));
        assert!(added.unwrap().is_none());
        assert_eq!(state.store.stock().last().unwrap().id, "P005");

        let (state, removed) = state.apply(Command::DeleteStockItem {
            id: "P005".to_string(),
        });
        assert!(removed.unwrap().is_none());
        assert_eq!(state.activity.len(), 1);
    }

    #[test]
    fn test_negative_update_stores_zero_and_logs() {
        let state = AppState::demo();

        let (state, outcome) = state.apply(Command::UpdateStockQuantity {
            id: "P001".to_string(),
            quantity: QuantityInput::from(-3),
        });

        assert_eq!(
            outcome.unwrap().unwrap().message,
            "Mise à jour inventaire : Laptop Pro (0)"
        );
        assert_eq!(state.store.stock()[0].quantity, 0);
    }

    #[test]
    fn test_unchanged_update_logs_nothing() {
        let state = AppState::demo();

        let (state, outcome) = state.apply(Command::UpdateStockQuantity {
            id: "P001".to_string(),
            quantity: QuantityInput::from(15),
        });
        assert!(outcome.unwrap().is_none());

        // P003 is already at 0; "abc" parses to 0.
        let (state, outcome) = state.apply(Command::UpdateStockQuantity {
            id: "P003".to_string(),
            quantity: QuantityInput::from("abc"),
        });
        assert!(outcome.unwrap().is_none());
        assert_eq!(state.activity.len(), 1);
    }

    #[test]
    fn test_rejected_command_leaves_state_untouched() {
        let state = AppState::demo();
        let before = state.clone();

        let draft = NewExpense {
            amount: Some(Money::new(-1)),
            ..NewExpense::default()
        };
        let (state, outcome) = state.apply(Command::AddExpense(draft));

        assert!(matches!(
            outcome,
            Err(CoreError::Validation(ValidationError::MustBeNonNegative { .. }))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_snapshot_reflects_mutations() {
        let state = AppState::demo();
        let (state, _) = state.apply(Command::DeleteSale {
            id: "V002".to_string(),
        });

        let snapshot = state.snapshot();
        assert_eq!(snapshot.kpis.total_revenue, Money::new(2_340_000));
        assert_eq!(snapshot.recent_activity.len(), 2);
        assert_eq!(snapshot.revenue_by_product.len(), 1);
    }
}
