//! In-memory balance store
//!
//! This module provides `MemoryBalanceStore`, a concurrent in-memory
//! implementation of the [`BalanceStore`] seam. One record per user id,
//! read as a snapshot and replaced wholesale on overwrite.
//!
//! # Thread Safety
//!
//! Backed by `DashMap`, so reads and overwrites for different users never
//! block each other and an overwrite is atomic at the record level: a
//! concurrent reader sees either the old or the new record, never a torn
//! one. Write *ordering* per user is not this store's concern; the point
//! service serializes mutations under the user lock.

use crate::core::traits::BalanceStore;
use crate::types::{PointError, Points, UserBalance, UserId};
use chrono::Utc;
use dashmap::DashMap;
use std::thread;
use std::time::Duration;

/// Concurrent in-memory balance records keyed by user id
///
/// An optional per-operation latency simulates the cost of a real backing
/// store; the wall-clock tests use it to show that a slow operation for
/// one user never delays another user.
#[derive(Debug, Default)]
pub struct MemoryBalanceStore {
    balances: DashMap<UserId, UserBalance>,
    latency: Option<Duration>,
}

impl MemoryBalanceStore {
    /// Create an empty store with no simulated latency
    pub fn new() -> Self {
        MemoryBalanceStore {
            balances: DashMap::new(),
            latency: None,
        }
    }

    /// Create an empty store that sleeps for `latency` on every operation
    pub fn with_latency(latency: Duration) -> Self {
        MemoryBalanceStore {
            balances: DashMap::new(),
            latency: Some(latency),
        }
    }

    fn simulate_io(&self) {
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
    }
}

impl BalanceStore for MemoryBalanceStore {
    fn read(&self, user_id: UserId) -> Result<UserBalance, PointError> {
        self.simulate_io();
        Ok(self
            .balances
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| UserBalance::zero(user_id, Utc::now())))
    }

    fn overwrite(&self, user_id: UserId, points: Points) -> Result<UserBalance, PointError> {
        self.simulate_io();
        let record = UserBalance {
            user_id,
            points,
            updated_at: Utc::now(),
        };
        self.balances.insert(user_id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unknown_user_synthesizes_zero_record() {
        let store = MemoryBalanceStore::new();

        let balance = store.read(1).unwrap();

        assert_eq!(balance.user_id, 1);
        assert_eq!(balance.points, 0);
    }

    #[test]
    fn test_read_does_not_create_a_record() {
        let store = MemoryBalanceStore::new();

        store.read(1).unwrap();

        assert_eq!(store.balances.len(), 0);
    }

    #[test]
    fn test_overwrite_then_read() {
        let store = MemoryBalanceStore::new();

        store.overwrite(1, 2500).unwrap();

        let balance = store.read(1).unwrap();
        assert_eq!(balance.user_id, 1);
        assert_eq!(balance.points, 2500);
    }

    #[test]
    fn test_overwrite_replaces_previous_value() {
        let store = MemoryBalanceStore::new();

        store.overwrite(1, 2500).unwrap();
        store.overwrite(1, 700).unwrap();

        assert_eq!(store.read(1).unwrap().points, 700);
        assert_eq!(store.balances.len(), 1);
    }

    #[test]
    fn test_overwrite_returns_persisted_record() {
        let store = MemoryBalanceStore::new();

        let record = store.overwrite(9, 1200).unwrap();

        assert_eq!(record.user_id, 9);
        assert_eq!(record.points, 1200);
        assert_eq!(store.read(9).unwrap(), record);
    }

    #[test]
    fn test_records_are_per_user() {
        let store = MemoryBalanceStore::new();

        store.overwrite(1, 100).unwrap();
        store.overwrite(2, 200).unwrap();

        assert_eq!(store.read(1).unwrap().points, 100);
        assert_eq!(store.read(2).unwrap().points, 200);
    }

    #[test]
    fn test_with_latency_slows_operations() {
        use std::time::Instant;

        let store = MemoryBalanceStore::with_latency(Duration::from_millis(30));

        let start = Instant::now();
        store.read(1).unwrap();

        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
