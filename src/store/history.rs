//! In-memory history store
//!
//! This module provides `MemoryHistoryStore`, an append-only in-memory
//! implementation of the [`HistoryStore`] seam. Entries for all users
//! share one ledger vector; the sequence id is the entry's 1-based
//! position in it, which makes the ids globally strictly increasing in
//! exactly append order.

use crate::core::traits::HistoryStore;
use crate::types::{HistoryEntry, PointError, Points, SequenceId, TransactionKind, UserId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::thread;
use std::time::Duration;

/// Append-only in-memory transaction ledger
///
/// A single mutex guards the vector so that sequence id assignment and the
/// append itself are one atomic step; two concurrent appends can never
/// observe the same id or land out of order relative to their ids.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    latency: Option<Duration>,
}

impl MemoryHistoryStore {
    /// Create an empty ledger with no simulated latency
    pub fn new() -> Self {
        MemoryHistoryStore {
            entries: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    /// Create an empty ledger that sleeps for `latency` on every operation
    pub fn with_latency(latency: Duration) -> Self {
        MemoryHistoryStore {
            entries: Mutex::new(Vec::new()),
            latency: Some(latency),
        }
    }

    fn simulate_io(&self) {
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }

    /// Total number of entries across all users
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the ledger holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionKind,
        occurred_at: DateTime<Utc>,
    ) -> Result<HistoryEntry, PointError> {
        self.simulate_io();
        let mut entries = self.entries.lock();
        let entry = HistoryEntry {
            sequence_id: entries.len() as SequenceId + 1,
            user_id,
            amount,
            kind,
            occurred_at,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    fn read_all(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, PointError> {
        self.simulate_io();
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_append_assigns_sequence_ids_from_one() {
        let store = MemoryHistoryStore::new();
        let now = Utc::now();

        let first = store.append(1, 1000, TransactionKind::Charge, now).unwrap();
        let second = store.append(1, 500, TransactionKind::Use, now).unwrap();

        assert_eq!(first.sequence_id, 1);
        assert_eq!(second.sequence_id, 2);
    }

    #[test]
    fn test_append_returns_the_stored_entry() {
        let store = MemoryHistoryStore::new();
        let now = Utc::now();

        let entry = store.append(7, 1000, TransactionKind::Charge, now).unwrap();

        assert_eq!(entry.user_id, 7);
        assert_eq!(entry.amount, 1000);
        assert_eq!(entry.kind, TransactionKind::Charge);
        assert_eq!(entry.occurred_at, now);
        assert_eq!(store.read_all(7).unwrap(), vec![entry]);
    }

    #[test]
    fn test_sequence_ids_are_global_across_users() {
        let store = MemoryHistoryStore::new();
        let now = Utc::now();

        store.append(1, 1000, TransactionKind::Charge, now).unwrap();
        store.append(2, 1000, TransactionKind::Charge, now).unwrap();
        let third = store.append(1, 500, TransactionKind::Use, now).unwrap();

        assert_eq!(third.sequence_id, 3);
    }

    #[test]
    fn test_read_all_filters_by_user_preserving_order() {
        let store = MemoryHistoryStore::new();
        let now = Utc::now();

        store.append(1, 1000, TransactionKind::Charge, now).unwrap();
        store.append(2, 2000, TransactionKind::Charge, now).unwrap();
        store.append(1, 500, TransactionKind::Use, now).unwrap();
        store.append(2, 700, TransactionKind::Use, now).unwrap();

        let entries = store.read_all(1).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sequence_id, 1);
        assert_eq!(entries[1].sequence_id, 3);
    }

    #[test]
    fn test_read_all_for_unknown_user_is_empty() {
        let store = MemoryHistoryStore::new();

        assert!(store.read_all(99).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends_get_distinct_increasing_ids() {
        let store = Arc::new(MemoryHistoryStore::new());
        let mut handles = vec![];

        for i in 0..20i64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store
                    .append(i % 4 + 1, 1000, TransactionKind::Charge, Utc::now())
                    .unwrap()
                    .sequence_id
            }));
        }

        let mut ids: Vec<SequenceId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<SequenceId>>());
        assert_eq!(store.len(), 20);
    }
}
