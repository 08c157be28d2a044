//! # Ledger State
//!
//! The dashboard's records and activity feed, shared by every command.
//!
//! ## Thread Safety
//! Uses `Arc<Mutex<AppState>>`. Each mutation holds the lock for exactly one
//! `AppState::apply`, so one operation always completes before the next one
//! observes the records. Nothing awaits while the lock is held.
//!
//! A command is applied to a copy that replaces the shared state only once
//! `apply` has returned. A panic mid-command therefore leaves the previous
//! state in place, and the lock is recovered instead of treated as fatal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use comptoir_core::{ActivityEntry, AppState, Command, CoreResult};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct LedgerState {
    state: Arc<Mutex<AppState>>,
}

impl LedgerState {
    pub fn new(state: AppState) -> Self {
        LedgerState {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = ledger.with_state(|state| state.snapshot());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// Executes a function with write access to the state.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let mut state = self.lock();
        f(&mut state)
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Ledger lock poisoned by a failed command; keeping last committed state");
            poisoned.into_inner()
        })
    }

    /// Applies a mutation and returns the activity entry it produced.
    pub fn apply(&self, command: Command) -> CoreResult<Option<ActivityEntry>> {
        self.with_state_mut(|slot| {
            let (next, outcome) = slot.clone().apply(command);
            *slot = next;
            outcome
        })
    }

    /// Records a system event (sign-in, sync).
    pub fn record_system(&self, message: impl Into<String>) -> ActivityEntry {
        let message = message.into();
        self.with_state_mut(|state| state.record_system(message))
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(AppState::demo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_core::ActivityKind;

    #[test]
    fn test_apply_updates_shared_state() {
        let ledger = LedgerState::default();
        let clone = ledger.clone();

        let entry = ledger
            .apply(Command::DeleteSale {
                id: "V001".to_string(),
            })
            .unwrap()
            .unwrap();

        assert_eq!(entry.message, "Vente supprimée : V001");
        assert_eq!(clone.with_state(|s| s.store.sales().len()), 2);
    }

    #[test]
    fn test_rejected_apply_keeps_state() {
        let ledger = LedgerState::default();
        let before = ledger.with_state(|s| s.clone());

        let draft = comptoir_core::NewSale {
            product_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(ledger.apply(Command::AddSale(draft)).is_err());
        assert_eq!(ledger.with_state(|s| s.clone()), before);
    }

    #[test]
    fn test_panicking_command_keeps_records_and_lock() {
        let ledger = LedgerState::default();
        let before = ledger.with_state(|s| s.clone());

        let crashed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ledger.with_state_mut(|state| {
                state.record_system("half-done");
                panic!("command crashed");
            })
        }));
        assert!(crashed.is_err());

        // Later commands still run against the shared records.
        assert_eq!(ledger.with_state(|s| s.store.sales().len()), 3);
        ledger
            .apply(Command::DeleteSale {
                id: "V001".to_string(),
            })
            .unwrap();
        assert_eq!(ledger.with_state(|s| s.store.sales().len()), 2);
        assert_eq!(before.store.sales().len(), 3);
    }

    #[test]
    fn test_record_system() {
        let ledger = LedgerState::default();
        let entry = ledger.record_system("Session ouverte par Jean Dupont");
        assert_eq!(entry.kind, ActivityKind::System);
        assert_eq!(ledger.with_state(|s| s.activity.len()), 2);
    }
}
