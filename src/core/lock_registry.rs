//! Per-user lock registry
//!
//! This module provides the `LockRegistry`, which maps a user id to an
//! exclusive FIFO-fair lock created lazily on first reference. All callers
//! referencing the same user id share one lock object, so exactly one
//! mutating operation per user is in flight at a time while operations on
//! different users proceed fully in parallel.
//!
//! # Fairness
//!
//! Waiters parked on one user's lock are admitted first-come-first-served.
//! A burst of concurrent calls against one user is therefore applied in
//! the order the calls reached `acquire`, which makes the observable end
//! state (final balance, history order) deterministic for a known issue
//! order.
//!
//! # Lifetime
//!
//! Lock entries are never removed; the user id space is bounded by real
//! users, so the map stays small for the process lifetime.

use crate::types::UserId;
use dashmap::DashMap;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{FairMutex, RawFairMutex};
use std::sync::Arc;

/// Registry of per-user exclusive locks
///
/// The registry owns the id-to-lock mapping and exposes only `acquire`;
/// the raw map is never handed out. Lazy creation is race-free: concurrent
/// first-time callers for the same unseen id resolve to a single lock
/// object through the map's atomic entry insertion.
#[derive(Debug, Default)]
pub struct LockRegistry {
    /// Concurrent map of user id to that user's lock
    ///
    /// DashMap shards internally, so lock lookup for one user never
    /// contends with lookup for another beyond the shard level.
    locks: DashMap<UserId, Arc<FairMutex<()>>>,
}

/// Exclusive hold on one user's lock
///
/// Returned by [`LockRegistry::acquire`]; the lock is released when the
/// token is dropped. Holders must not call back into the registry while
/// the token is alive: the service holds at most one user's lock at a
/// time, which is what rules out deadlock.
#[must_use = "the user lock is released as soon as the token is dropped"]
pub struct UserLockToken {
    _guard: ArcMutexGuard<RawFairMutex, ()>,
}

impl LockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        LockRegistry {
            locks: DashMap::new(),
        }
    }

    /// Acquire the exclusive lock for a user, blocking until granted
    ///
    /// The first caller referencing an unseen user id creates its lock
    /// entry; subsequent callers share it. Waiters are granted the lock in
    /// the order they arrived.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user whose lock to acquire
    ///
    /// # Returns
    ///
    /// A token that releases the lock on drop
    pub fn acquire(&self, user_id: UserId) -> UserLockToken {
        // Clone the Arc out so the map shard guard is dropped before
        // blocking; parking while holding a shard guard would stall
        // unrelated users hashed to the same shard.
        let lock = self
            .locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(FairMutex::new(())))
            .clone();

        UserLockToken {
            _guard: lock.lock_arc(),
        }
    }
}
