//! # Dashboard Commands
//!
//! Read-only views: the KPI overview and the activity feed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Chiffre d'affaires   Dépenses        Valeur stock    Bénéfice estimé   │
//! │  3 640 000 FCFA       3 460 000 FCFA  8 962 500 FCFA  180 000 FCFA      │
//! │                                                                         │
//! │  Stock: 2 sains · 1 faible · 1 rupture       Activité récente           │
//! │  Critique: Monitor 4K (3), Clavier (0)       • Système initialisé...    │
//! └─────────────────────────────────────────────────────────────────────────┘
//!          ▲ invoke('get_dashboard') → DashboardSnapshot
//! ```

use comptoir_core::{ActivityEntry, DashboardSnapshot};
use tracing::debug;

use crate::state::LedgerState;

/// KPIs, stock stats, critical items, revenue per product and the feed.
pub fn get_dashboard(ledger: &LedgerState) -> DashboardSnapshot {
    debug!("get_dashboard command");
    ledger.with_state(|state| state.snapshot())
}

/// Up to ten entries, most recent first.
pub fn get_activity(ledger: &LedgerState) -> Vec<ActivityEntry> {
    debug!("get_activity command");
    ledger.with_state(|state| state.activity.to_vec())
}
