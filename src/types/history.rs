//! History-related types for the point ledger
//!
//! This module defines the transaction kinds and the immutable history
//! entry record appended by every completed mutating operation.

use super::balance::{Points, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequence identifier
///
/// Assigned by the history store at append time. Strictly increasing
/// across all users, starting at 1; its order is the true total order of
/// completed mutating operations in the whole system.
pub type SequenceId = u64;

/// Kinds of mutating operations recorded in the history
///
/// Each completed charge or use appends exactly one entry of the matching
/// kind. Failed operations append nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Increase a user's balance
    Charge,

    /// Decrease a user's balance
    ///
    /// Bounded below by zero; a use that would overdraw the balance is
    /// rejected before any entry is written.
    Use,
}

/// A single append-only ledger entry
///
/// Immutable once created; never updated or deleted. Entries for all
/// users live in one ledger and are filtered by user id on read, which
/// preserves their relative order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Globally unique, strictly increasing sequence id
    pub sequence_id: SequenceId,

    /// The user the operation applied to
    pub user_id: UserId,

    /// Operation amount, always strictly positive
    pub amount: Points,

    /// Whether this entry records a charge or a use
    pub kind: TransactionKind,

    /// When the entry was appended
    ///
    /// Taken while the user's lock is held, so within one user the
    /// timestamp order can never contradict the sequence id order.
    pub occurred_at: DateTime<Utc>,
}
