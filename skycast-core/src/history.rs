use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by [`SearchHistory::snapshot`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One successfully answered query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub location: String,
    pub queried_at: DateTime<Local>,
}

/// Append-only log of queried locations, alive for the lifetime of the
/// process.
///
/// Concurrent queries share one history through a handle; appends from
/// overlapping queries interleave in completion order. Records are never
/// mutated or removed.
#[derive(Debug, Default)]
pub struct SearchHistory {
    records: Mutex<Vec<HistoryRecord>>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Infallible; an in-memory append cannot fail.
    pub fn append(&self, location: &str, queried_at: DateTime<Local>) {
        self.lock().push(HistoryRecord {
            location: location.to_string(),
            queried_at,
        });
    }

    /// Rendered history lines in insertion order, ready for display.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|record| {
                format!(
                    "{} @ {}",
                    record.location,
                    record.queried_at.format(TIMESTAMP_FORMAT)
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<HistoryRecord>> {
        // A poisoned append leaves the Vec intact, so the lock stays usable.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
