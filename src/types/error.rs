//! Error types for the point ledger
//!
//! This module defines all errors the point service can return. Every
//! variant is a synchronous, caller-recoverable failure: no error leaves a
//! user lock held, and validation errors occur before any storage write.
//!
//! # Error Categories
//!
//! - **Validation errors**: non-positive user id or amount, charge below
//!   the minimum threshold. Rejected before any lock is taken.
//! - **Business errors**: insufficient balance for a use. Rejected under
//!   the lock, before any history entry is written.
//! - **Arithmetic errors**: balance overflow on charge.
//! - **Storage errors**: faults surfaced by a store; never silently
//!   retried, since masking one would break the balance/history
//!   correspondence.

use super::balance::{Points, UserId};
use thiserror::Error;

/// Main error type for the point ledger
///
/// Each variant carries the context needed to diagnose the rejection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    /// User id is zero or negative
    #[error("invalid user id {id}")]
    InvalidUserId {
        /// The rejected id
        id: UserId,
    },

    /// Operation amount is zero or negative
    ///
    /// Applies to both charges and uses; a non-positive amount is a
    /// malformed call regardless of lock state.
    #[error("invalid amount {amount}: must be positive")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Points,
    },

    /// Charge amount is below the minimum threshold
    #[error("charge of {amount} is below the minimum of {minimum}")]
    ChargeBelowMinimum {
        /// The rejected amount
        amount: Points,
        /// The minimum charge amount
        minimum: Points,
    },

    /// Use amount exceeds the current balance
    ///
    /// The balance and history remain unchanged; no entry is written on
    /// this path.
    #[error("insufficient balance for user {user}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// The user whose balance was too low
        user: UserId,
        /// Balance at the time of the check
        balance: Points,
        /// Requested use amount
        requested: Points,
    },

    /// Charging the amount would overflow the balance
    #[error("balance overflow for user {user}")]
    BalanceOverflow {
        /// The user whose balance would overflow
        user: UserId,
    },

    /// A store reported a fault
    ///
    /// If the fault occurred after a successful history append, the entry
    /// stands as a recorded but unapplied attempt.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage fault
        message: String,
    },
}

// Helper functions for creating common errors

impl PointError {
    /// Create an InvalidUserId error
    pub fn invalid_user_id(id: UserId) -> Self {
        PointError::InvalidUserId { id }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Points) -> Self {
        PointError::NonPositiveAmount { amount }
    }

    /// Create a ChargeBelowMinimum error
    pub fn charge_below_minimum(amount: Points, minimum: Points) -> Self {
        PointError::ChargeBelowMinimum { amount, minimum }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(user: UserId, balance: Points, requested: Points) -> Self {
        PointError::InsufficientBalance {
            user,
            balance,
            requested,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(user: UserId) -> Self {
        PointError::BalanceOverflow { user }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        PointError::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_user_id(
        PointError::InvalidUserId { id: -3 },
        "invalid user id -3"
    )]
    #[case::non_positive_amount(
        PointError::NonPositiveAmount { amount: 0 },
        "invalid amount 0: must be positive"
    )]
    #[case::charge_below_minimum(
        PointError::ChargeBelowMinimum { amount: 999, minimum: 1000 },
        "charge of 999 is below the minimum of 1000"
    )]
    #[case::insufficient_balance(
        PointError::InsufficientBalance { user: 7, balance: 500, requested: 2000 },
        "insufficient balance for user 7: balance 500, requested 2000"
    )]
    #[case::balance_overflow(
        PointError::BalanceOverflow { user: 7 },
        "balance overflow for user 7"
    )]
    #[case::storage(
        PointError::Storage { message: "write failed".to_string() },
        "storage error: write failed"
    )]
    fn test_error_display(#[case] error: PointError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_user_id(
        PointError::invalid_user_id(0),
        PointError::InvalidUserId { id: 0 }
    )]
    #[case::non_positive_amount(
        PointError::non_positive_amount(-5),
        PointError::NonPositiveAmount { amount: -5 }
    )]
    #[case::charge_below_minimum(
        PointError::charge_below_minimum(500, 1000),
        PointError::ChargeBelowMinimum { amount: 500, minimum: 1000 }
    )]
    #[case::insufficient_balance(
        PointError::insufficient_balance(1, 100, 200),
        PointError::InsufficientBalance { user: 1, balance: 100, requested: 200 }
    )]
    #[case::balance_overflow(
        PointError::balance_overflow(9),
        PointError::BalanceOverflow { user: 9 }
    )]
    #[case::storage(
        PointError::storage("disk full"),
        PointError::Storage { message: "disk full".to_string() }
    )]
    fn test_helper_functions(#[case] result: PointError, #[case] expected: PointError) {
        assert_eq!(result, expected);
    }
}
