//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `balance`: Balance record and identifier/amount aliases
//! - `history`: History entries and transaction kinds
//! - `error`: Error types for the point ledger

pub mod balance;
pub mod error;
pub mod history;

pub use balance::{Points, UserBalance, UserId};
pub use error::PointError;
pub use history::{HistoryEntry, SequenceId, TransactionKind};
