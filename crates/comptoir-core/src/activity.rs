//! # Activity Log
//!
//! The "recent activity" feed shown beside the dashboard.
//!
//! ## Ring Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record("Vente ajoutée : V004 ...")                                     │
//! │                                                                         │
//! │   front (newest)                                   back (oldest)        │
//! │   ┌──────┬──────┬──────┬─────┬──────┐                                   │
//! │   │ NEW  │  e9  │  e8  │ ... │  e1  │  e0 ──► evicted (len > 10)        │
//! │   └──────┴──────┴──────┴─────┴──────┘                                   │
//! │                                                                         │
//! │  • push_front + truncate(10): pure age-based eviction                   │
//! │  • entries are never removed any other way                              │
//! │  • messages are copies: deleting a sale does not touch its entries      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::ACTIVITY_LOG_CAPACITY;

/// What kind of event an entry describes. Drives the colored dot in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Sale,
    Expense,
    Stock,
    System,
}

/// A single line of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    /// UUID v4, unique within (and well beyond) the retained window.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    /// Wall-clock time of the entry as shown in the feed (`HH:MM:SS`).
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Bounded, most-recent-first log of activity entries.
///
/// Serializes as a plain array. There is no `Deserialize`: a log only ever
/// grows through [`ActivityLog::record`], which keeps the capacity bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        ActivityLog {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY + 1),
        }
    }

    /// Records an event stamped with the current time.
    pub fn record(&mut self, kind: ActivityKind, message: impl Into<String>) -> ActivityEntry {
        self.record_at(kind, message, Utc::now())
    }

    /// Records an event with an explicit timestamp.
    ///
    /// The entry goes to the front; anything past capacity falls off the
    /// back. Returns a copy of the new entry.
    pub fn record_at(
        &mut self,
        kind: ActivityKind,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> ActivityEntry {
        let entry = ActivityEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            message: message.into(),
            timestamp: at,
        };

        self.entries.push_front(entry.clone());
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);

        entry
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> + '_ {
        self.entries.iter()
    }

    /// Snapshot of the retained entries, most recent first.
    pub fn to_vec(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    /// The newest entry, if any.
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
