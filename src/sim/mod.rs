//! Workload simulator
//!
//! This module drives a shared `PointService` from multiple worker
//! threads, standing in for the transport layer the crate deliberately
//! excludes. Each worker issues a deterministic alternating mix of
//! charges and uses, spread across a configurable set of users.
//!
//! Uses rejected for insufficient balance are an expected part of the
//! workload and are tallied rather than treated as failures; any other
//! error aborts the run.

use crate::core::{PointService, MIN_CHARGE_AMOUNT};
use crate::store::{MemoryBalanceStore, MemoryHistoryStore};
use crate::types::{PointError, Points, UserBalance, UserId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tracing::info;

/// Simulation parameters
///
/// Construct via [`SimConfig::new`] to get fallback handling for invalid
/// values, or use [`SimConfig::default`] directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of distinct users targeted by the workload
    pub users: u32,

    /// Number of worker threads issuing operations
    pub workers: usize,

    /// Operations issued per worker
    pub rounds: u32,

    /// Amount for every charge; at least [`MIN_CHARGE_AMOUNT`]
    pub charge_amount: Points,

    /// Amount for every use; strictly positive
    pub use_amount: Points,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            users: 4,
            workers: num_cpus::get(),
            rounds: 24,
            charge_amount: MIN_CHARGE_AMOUNT,
            use_amount: 500,
        }
    }
}

impl SimConfig {
    /// Create a config, falling back to defaults for invalid values
    ///
    /// Zero `users`, `workers`, or `rounds` and out-of-range amounts fall
    /// back to their defaults so a misconfigured run still exercises the
    /// service instead of erroring on every operation.
    pub fn new(
        users: u32,
        workers: usize,
        rounds: u32,
        charge_amount: Points,
        use_amount: Points,
    ) -> Self {
        let default = SimConfig::default();
        SimConfig {
            users: if users == 0 { default.users } else { users },
            workers: if workers == 0 {
                default.workers
            } else {
                workers
            },
            rounds: if rounds == 0 { default.rounds } else { rounds },
            charge_amount: if charge_amount < MIN_CHARGE_AMOUNT {
                default.charge_amount
            } else {
                charge_amount
            },
            use_amount: if use_amount <= 0 {
                default.use_amount
            } else {
                use_amount
            },
        }
    }
}

/// Outcome of a simulation run
#[derive(Debug)]
pub struct SimReport {
    /// Final balance record for every user in the workload
    pub balances: Vec<UserBalance>,

    /// Charges applied; charges never fail for a validated config
    pub charges_applied: u64,

    /// Uses that found sufficient balance and were applied
    pub uses_applied: u64,

    /// Uses rejected for insufficient balance
    pub uses_rejected: u64,
}

/// Run the configured workload against a fresh service
///
/// Workers start together behind a barrier and issue `rounds` operations
/// each: even rounds charge, odd rounds use, with the target user rotating
/// so every worker touches every user. The final balances must satisfy
/// the ledger correspondence:
/// `sum(points) == charges_applied * charge_amount - uses_applied * use_amount`.
///
/// # Errors
///
/// Returns the first non-balance error a worker encountered (for the
/// in-memory stores this means a `Storage` fault, which they never
/// produce).
pub fn run(config: &SimConfig) -> Result<SimReport, PointError> {
    let service = Arc::new(PointService::new(
        MemoryBalanceStore::new(),
        MemoryHistoryStore::new(),
    ));

    let barrier = Arc::new(Barrier::new(config.workers));
    let charges_applied = Arc::new(AtomicU64::new(0));
    let uses_applied = Arc::new(AtomicU64::new(0));
    let uses_rejected = Arc::new(AtomicU64::new(0));

    let mut handles = Vec::with_capacity(config.workers);
    for worker in 0..config.workers {
        let service = Arc::clone(&service);
        let barrier = Arc::clone(&barrier);
        let charges_applied = Arc::clone(&charges_applied);
        let uses_applied = Arc::clone(&uses_applied);
        let uses_rejected = Arc::clone(&uses_rejected);
        let config = config.clone();

        handles.push(thread::spawn(move || -> Result<(), PointError> {
            barrier.wait();
            for round in 0..config.rounds {
                let user_id = user_for_round(&config, worker, round);
                if round % 2 == 0 {
                    service.charge(user_id, config.charge_amount)?;
                    charges_applied.fetch_add(1, Ordering::Relaxed);
                } else {
                    match service.use_points(user_id, config.use_amount) {
                        Ok(_) => {
                            uses_applied.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(PointError::InsufficientBalance { .. }) => {
                            uses_rejected.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(other) => return Err(other),
                    }
                }
            }
            Ok(())
        }));
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| PointError::storage("simulation worker panicked"))??;
    }

    let mut balances = Vec::with_capacity(config.users as usize);
    for user_id in 1..=config.users as UserId {
        balances.push(service.balance(user_id)?);
    }

    let report = SimReport {
        balances,
        charges_applied: charges_applied.load(Ordering::Relaxed),
        uses_applied: uses_applied.load(Ordering::Relaxed),
        uses_rejected: uses_rejected.load(Ordering::Relaxed),
    };
    info!(
        charges = report.charges_applied,
        uses = report.uses_applied,
        rejected = report.uses_rejected,
        "simulation finished"
    );
    Ok(report)
}

/// Target user for one worker's round, rotating across all users
fn user_for_round(config: &SimConfig, worker: usize, round: u32) -> UserId {
    ((worker as u32 + round) % config.users) as UserId + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();

        assert_eq!(config.users, 4);
        assert_eq!(config.workers, num_cpus::get());
        assert_eq!(config.rounds, 24);
        assert_eq!(config.charge_amount, MIN_CHARGE_AMOUNT);
        assert_eq!(config.use_amount, 500);
    }

    #[test]
    fn test_new_keeps_valid_values() {
        let config = SimConfig::new(8, 2, 10, 2000, 750);

        assert_eq!(
            config,
            SimConfig {
                users: 8,
                workers: 2,
                rounds: 10,
                charge_amount: 2000,
                use_amount: 750,
            }
        );
    }

    #[test]
    fn test_new_falls_back_for_invalid_values() {
        let default = SimConfig::default();
        let config = SimConfig::new(0, 0, 0, 999, 0);

        assert_eq!(config, default);
    }

    #[test]
    fn test_user_for_round_rotates_through_all_users() {
        let config = SimConfig::new(3, 1, 6, 1000, 500);

        let users: Vec<UserId> = (0..6).map(|round| user_for_round(&config, 0, round)).collect();

        assert_eq!(users, vec![1, 2, 3, 1, 2, 3]);
        assert!(users.iter().all(|&id| id >= 1 && id <= 3));
    }

    #[test]
    fn test_run_satisfies_ledger_correspondence() {
        let config = SimConfig::new(4, 4, 20, 1000, 500);

        let report = run(&config).unwrap();

        let total: Points = report.balances.iter().map(|b| b.points).sum();
        let expected = report.charges_applied as Points * config.charge_amount
            - report.uses_applied as Points * config.use_amount;
        assert_eq!(total, expected);
        assert!(report.balances.iter().all(|b| b.points >= 0));
        assert_eq!(report.balances.len(), 4);
    }

    #[test]
    fn test_run_counts_every_operation() {
        let config = SimConfig::new(2, 3, 10, 1000, 500);

        let report = run(&config).unwrap();

        let issued = (config.workers as u64) * (config.rounds as u64);
        assert_eq!(
            report.charges_applied + report.uses_applied + report.uses_rejected,
            issued
        );
    }

    #[test]
    fn test_single_worker_run_is_deterministic() {
        // One worker, one user: charge/use alternate strictly, so every
        // use finds sufficient balance.
        let config = SimConfig::new(1, 1, 10, 1000, 500);

        let report = run(&config).unwrap();

        assert_eq!(report.charges_applied, 5);
        assert_eq!(report.uses_applied, 5);
        assert_eq!(report.uses_rejected, 0);
        assert_eq!(report.balances[0].points, 5 * 1000 - 5 * 500);
    }
}
