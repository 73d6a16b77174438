//! Storage traits consumed by the point service
//!
//! This module defines the two external-collaborator seams the core talks
//! to. The stores are not serialization-aware on their own: the point
//! service is the only permitted writer path and serializes mutating
//! access per user via the lock registry. Reads may bypass the lock.

use crate::types::{HistoryEntry, PointError, Points, TransactionKind, UserBalance, UserId};
use chrono::{DateTime, Utc};

/// Trait for the balance store
///
/// Holds the current balance record per user id. Implementations must be
/// shareable across threads; per-user write ordering is the caller's
/// responsibility.
pub trait BalanceStore: Send + Sync {
    /// Read the current balance for a user
    ///
    /// An absent id is not an error: implementations synthesize a
    /// zero-point record with the given id, so callers never see a
    /// "not found" outcome.
    ///
    /// # Returns
    ///
    /// * `Ok(UserBalance)` - The stored record, or a zero-point default
    /// * `Err(PointError)` - If the store reports a fault
    fn read(&self, user_id: UserId) -> Result<UserBalance, PointError>;

    /// Unconditionally overwrite a user's balance
    ///
    /// The write is atomic at the storage layer: a concurrent reader sees
    /// either the pre- or post-write record, never a torn one.
    ///
    /// # Returns
    ///
    /// * `Ok(UserBalance)` - The persisted record with a fresh `updated_at`
    /// * `Err(PointError)` - If the store reports a fault
    fn overwrite(&self, user_id: UserId, points: Points) -> Result<UserBalance, PointError>;
}

/// Trait for the append-only history store
///
/// Entries for all users share one ledger; the store assigns each entry
/// the next global sequence id at append time, and that assignment order
/// is the total order of completed mutations across the system.
pub trait HistoryStore: Send + Sync {
    /// Append a new history entry
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the operation applied to
    /// * `amount` - Operation amount, strictly positive
    /// * `kind` - Charge or Use
    /// * `occurred_at` - Timestamp taken by the caller under the user lock
    ///
    /// # Returns
    ///
    /// * `Ok(HistoryEntry)` - The appended entry with its sequence id
    /// * `Err(PointError)` - If the store reports a fault
    fn append(
        &self,
        user_id: UserId,
        amount: Points,
        kind: TransactionKind,
        occurred_at: DateTime<Utc>,
    ) -> Result<HistoryEntry, PointError>;

    /// Read all entries for a user in ascending sequence id order
    fn read_all(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, PointError>;
}
