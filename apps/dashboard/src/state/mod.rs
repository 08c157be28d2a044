//! # State Module
//!
//! Manages application state for the dashboard.
//!
//! Instead of one struct holding everything, each concern gets its own
//! state type and each command takes only the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppContext (lib.rs)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌────────────────┬───────┴────────┬──────────────────┐             │
//! │     ▼                ▼                ▼                  ▼             │
//! │  ┌────────────┐ ┌──────────────┐ ┌────────────┐ ┌──────────────┐       │
//! │  │ LedgerState│ │ SessionState │ │ SyncState  │ │ ConfigState  │       │
//! │  │            │ │              │ │            │ │              │       │
//! │  │ Arc<Mutex< │ │ RwLock<      │ │ AtomicBool │ │ store name   │       │
//! │  │  AppState  │ │  Option<User>│ │ last_sync  │ │ currency     │       │
//! │  │ >>         │ │ >            │ │            │ │ delays       │       │
//! │  └────────────┘ └──────────────┘ └────────────┘ └──────────────┘       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • LedgerState: Mutex held for one apply, never across an await         │
//! │  • SessionState: async RwLock, never held across the sign-in delay      │
//! │  • SyncState: atomic flag + guard, one sync at a time                   │
//! │  • ConfigState: read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;
mod session;
mod sync;

pub use config::ConfigState;
pub use ledger::LedgerState;
pub use session::SessionState;
pub use sync::{SyncGuard, SyncState, SyncStatusDto};
