//! Balance-related types for the point ledger
//!
//! This module defines the UserBalance record and the identifier/amount
//! aliases used throughout the system.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User identifier
///
/// Valid user ids are strictly positive; zero and negative ids are
/// rejected before any storage access.
pub type UserId = i64;

/// Point amount
///
/// Balances are always non-negative; operation amounts are always
/// strictly positive.
pub type Points = i64;

/// Current point balance for a single user
///
/// One logical record exists per user id. The record is owned by the
/// balance store and mutated only via full overwrite by the point service
/// while holding that user's lock. A user with no record yet is
/// indistinguishable from a user with zero points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBalance {
    /// The user this balance belongs to
    pub user_id: UserId,

    /// Current point balance
    ///
    /// Equals the sum of charge amounts minus the sum of use amounts
    /// recorded in the user's history at any quiescent point.
    pub points: Points,

    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

impl UserBalance {
    /// Create a zero-point balance record for the given user
    ///
    /// Used by balance stores to synthesize a default record when a
    /// previously-unseen user id is read; reading an absent id is not an
    /// error.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user id the record belongs to
    /// * `updated_at` - Timestamp to stamp the synthesized record with
    ///
    /// # Returns
    ///
    /// A `UserBalance` with zero points
    pub fn zero(user_id: UserId, updated_at: DateTime<Utc>) -> Self {
        UserBalance {
            user_id,
            points: 0,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_creates_empty_record() {
        let now = Utc::now();
        let balance = UserBalance::zero(7, now);

        assert_eq!(balance.user_id, 7);
        assert_eq!(balance.points, 0);
        assert_eq!(balance.updated_at, now);
    }
}
