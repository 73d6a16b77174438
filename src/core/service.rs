//! Point service
//!
//! This module provides the `PointService`, which orchestrates validated
//! charge/use operations under the per-user lock and exposes the two read
//! operations. It enforces the business invariants:
//!
//! - A balance never goes negative.
//! - Every completed mutation appends exactly one history entry, and the
//!   per-user history order matches the order mutations were admitted.
//! - Charges below the minimum threshold are rejected before any lock is
//!   taken or any storage write happens.

use crate::core::lock_registry::LockRegistry;
use crate::core::traits::{BalanceStore, HistoryStore};
use crate::types::{HistoryEntry, PointError, Points, TransactionKind, UserBalance, UserId};
use chrono::Utc;
use tracing::{debug, warn};

/// Minimum amount accepted by a charge
pub const MIN_CHARGE_AMOUNT: Points = 1000;

/// Orchestrates point operations over a balance store and a history store
///
/// The service is the only permitted writer path to the stores. It is
/// shared across worker threads (`&self` methods throughout); per-user
/// serialization comes from the internal lock registry, so operations on
/// different users never contend beyond map-shard level.
pub struct PointService<B, H> {
    balances: B,
    history: H,
    locks: LockRegistry,
}

impl<B: BalanceStore, H: HistoryStore> PointService<B, H> {
    /// Create a new service over the given stores
    pub fn new(balances: B, history: H) -> Self {
        PointService {
            balances,
            history,
            locks: LockRegistry::new(),
        }
    }

    /// Look up a user's current balance
    ///
    /// Lock-free read-through: the overwrite on the store side is atomic,
    /// so a concurrent reader sees either the pre- or post-mutation
    /// record, never a torn one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUserId` for a non-positive id, or a store fault.
    pub fn balance(&self, user_id: UserId) -> Result<UserBalance, PointError> {
        validate_user_id(user_id)?;
        self.balances.read(user_id)
    }

    /// Look up a user's transaction history
    ///
    /// Entries are returned in ascending sequence id order, which for one
    /// user equals the completion order of its mutations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUserId` for a non-positive id, or a store fault.
    pub fn history(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, PointError> {
        validate_user_id(user_id)?;
        self.history.read_all(user_id)
    }

    /// Charge points to a user's balance
    ///
    /// Validation happens before the user lock is taken, so rejected calls
    /// have zero side effects. Under the lock the sequence is: read the
    /// current balance, append the charge entry (the store assigns the
    /// sequence id), compute the new balance with checked arithmetic, and
    /// overwrite.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to charge
    /// * `amount` - Points to add; must be at least [`MIN_CHARGE_AMOUNT`]
    ///
    /// # Returns
    ///
    /// The updated balance record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user id is non-positive (`InvalidUserId`)
    /// - The amount is non-positive (`NonPositiveAmount`)
    /// - The amount is below the minimum (`ChargeBelowMinimum`)
    /// - The new balance would overflow (`BalanceOverflow`)
    /// - A store reports a fault (`Storage`)
    pub fn charge(&self, user_id: UserId, amount: Points) -> Result<UserBalance, PointError> {
        validate_user_id(user_id)?;
        validate_amount(amount)?;
        if amount < MIN_CHARGE_AMOUNT {
            return Err(PointError::charge_below_minimum(amount, MIN_CHARGE_AMOUNT));
        }

        let _token = self.locks.acquire(user_id);

        let current = self.balances.read(user_id)?;
        let entry = self
            .history
            .append(user_id, amount, TransactionKind::Charge, Utc::now())?;

        let new_points = current
            .points
            .checked_add(entry.amount)
            .ok_or_else(|| PointError::balance_overflow(user_id))?;

        let updated = self.balances.overwrite(user_id, new_points)?;
        debug!(
            user_id,
            amount,
            points = updated.points,
            sequence_id = entry.sequence_id,
            "charge applied"
        );
        Ok(updated)
    }

    /// Use points from a user's balance
    ///
    /// The insufficient-balance check and the subtraction happen under the
    /// same lock, so no other mutation can slip between check and write.
    /// A rejected use releases the lock and writes no history entry.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user spending points
    /// * `amount` - Points to subtract; must be positive
    ///
    /// # Returns
    ///
    /// The updated balance record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user id is non-positive (`InvalidUserId`)
    /// - The amount is non-positive (`NonPositiveAmount`)
    /// - The balance is lower than the amount (`InsufficientBalance`)
    /// - A store reports a fault (`Storage`)
    pub fn use_points(&self, user_id: UserId, amount: Points) -> Result<UserBalance, PointError> {
        validate_user_id(user_id)?;
        validate_amount(amount)?;

        let _token = self.locks.acquire(user_id);

        let current = self.balances.read(user_id)?;
        if current.points < amount {
            warn!(
                user_id,
                amount,
                points = current.points,
                "use rejected: balance too low"
            );
            return Err(PointError::insufficient_balance(
                user_id,
                current.points,
                amount,
            ));
        }

        let entry = self
            .history
            .append(user_id, amount, TransactionKind::Use, Utc::now())?;

        // Non-negative by the guarded check above, performed under the
        // same lock.
        let new_points = current.points - entry.amount;

        let updated = self.balances.overwrite(user_id, new_points)?;
        debug!(
            user_id,
            amount,
            points = updated.points,
            sequence_id = entry.sequence_id,
            "use applied"
        );
        Ok(updated)
    }
}

/// Reject zero and negative user ids
fn validate_user_id(user_id: UserId) -> Result<(), PointError> {
    if user_id <= 0 {
        return Err(PointError::invalid_user_id(user_id));
    }
    Ok(())
}

/// Reject zero and negative amounts
fn validate_amount(amount: Points) -> Result<(), PointError> {
    if amount <= 0 {
        return Err(PointError::non_positive_amount(amount));
    }
    Ok(())
}
