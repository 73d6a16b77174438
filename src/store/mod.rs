//! In-memory store implementations
//!
//! The stores are the system's external collaborators; these in-memory
//! implementations back the service in tests, benches, and the workload
//! simulator.
//!
//! # Components
//!
//! - `balance` - Concurrent per-user balance records
//! - `history` - Append-only transaction ledger with global sequence ids

pub mod balance;
pub mod history;

pub use balance::MemoryBalanceStore;
pub use history::MemoryHistoryStore;
