//! Point Ledger Library
//! # Overview
//!
//! This library provides a thread-safe per-user point balance service with
//! an append-only transaction history.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (UserBalance, HistoryEntry, etc.)
//! - [`cli`] - CLI argument parsing for the workload driver
//! - [`core`] - Business logic components:
//!   - [`core::service`] - Charge/use orchestration and validation
//!   - [`core::lock_registry`] - Per-user FIFO-fair lock registry
//!   - [`core::traits`] - Storage seams the service consumes
//! - [`store`] - In-memory store implementations
//! - [`sim`] - Multi-threaded workload simulator
//! - [`io`] - CSV report output
//!
//! # Operations
//!
//! The service exposes four operations:
//!
//! - **Charge**: Add points to a user's balance (minimum 1000 per charge)
//! - **Use**: Subtract points from a user's balance (requires sufficient
//!   balance; a balance never goes negative)
//! - **Balance**: Read a user's current balance (zero for unseen users)
//! - **History**: Read a user's ledger entries in sequence order
//!
//! # Concurrency
//!
//! Concurrent mutations against the same user are serialized in
//! first-come-first-served order by a lazily-created per-user lock;
//! mutations against different users run fully in parallel. Every
//! completed mutation appends one ledger entry whose globally increasing
//! sequence id reflects the admission order.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod sim;
pub mod store;
pub mod types;

pub use core::{BalanceStore, HistoryStore, LockRegistry, PointService, MIN_CHARGE_AMOUNT};
pub use io::write_balances_csv;
pub use store::{MemoryBalanceStore, MemoryHistoryStore};
pub use types::{
    HistoryEntry, PointError, Points, SequenceId, TransactionKind, UserBalance, UserId,
};
