//! # Sync Commands
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sync Commands                                    │
//! │                                                                         │
//! │  sync()              - Simulated cloud sync (one at a time)             │
//! │  get_sync_status()   - Running flag and last successful sync            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sync Timeline
//! ```text
//!  t=0      "Tentative de synchronisation cloud..."     (system entry)
//!  t=delay  last_sync = now
//!           "Base de données synchronisée avec succès"  (system entry)
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{LedgerState, SyncState, SyncStatusDto};

const SYNC_STARTED: &str = "Tentative de synchronisation cloud...";
const SYNC_SUCCEEDED: &str = "Base de données synchronisée avec succès";

/// Runs the simulated sync and returns the resulting status.
pub async fn sync(ledger: &LedgerState, sync: &SyncState) -> Result<SyncStatusDto, ApiError> {
    debug!("sync command");

    let guard = sync.begin()?;
    ledger.record_system(SYNC_STARTED);

    tokio::time::sleep(sync.delay()).await;

    let at = Utc::now();
    guard.complete(at);
    ledger.record_system(SYNC_SUCCEEDED);
    info!(%at, "Sync completed");

    Ok(sync.status())
}

pub fn get_sync_status(sync: &SyncState) -> SyncStatusDto {
    debug!("get_sync_status command");
    sync.status()
}
