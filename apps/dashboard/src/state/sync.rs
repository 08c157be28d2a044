//! # Sync State
//!
//! Tracks the simulated cloud sync.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   begin() ──► running = true ──► SyncGuard                              │
//! │      │                               │                                  │
//! │      │ already running               │ complete(at)  last_sync = at     │
//! │      ▼                               │                                  │
//! │   SYNC_IN_PROGRESS                   ▼ drop        running = false      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard clears the running flag even when the sync task is dropped
//! half-way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;

/// What the front-end shows next to the sync button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusDto {
    pub is_syncing: bool,
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct SyncState {
    delay: Duration,
    running: AtomicBool,
    last_sync: RwLock<Option<DateTime<Utc>>>,
}

impl SyncState {
    pub fn new(delay: Duration) -> Self {
        SyncState {
            delay,
            running: AtomicBool::new(false),
            last_sync: RwLock::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Marks a sync as started, or fails if one is already running.
    pub fn begin(&self) -> Result<SyncGuard<'_>, ApiError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| SyncGuard { state: self })
            .map_err(|_| ApiError::sync_in_progress())
    }

    /// Gets the current sync status.
    pub fn status(&self) -> SyncStatusDto {
        SyncStatusDto {
            is_syncing: self.running.load(Ordering::Acquire),
            last_sync: self.last_sync.read().map(|s| *s).unwrap_or(None),
        }
    }
}

/// Proof that a sync is running. Dropping it ends the sync.
#[derive(Debug)]
pub struct SyncGuard<'a> {
    state: &'a SyncState,
}

impl SyncGuard<'_> {
    /// Stamps a successful sync.
    pub fn complete(self, at: DateTime<Utc>) {
        if let Ok(mut last) = self.state.last_sync.write() {
            *last = Some(at);
        }
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.state.running.store(false, Ordering::Release);
    }
}
