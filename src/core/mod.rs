//! Core business logic module
//!
//! This module contains the concurrency-control core:
//! - `traits` - Storage seams the service consumes
//! - `lock_registry` - Per-user FIFO-fair lock registry
//! - `service` - Point operation orchestration

pub mod lock_registry;
pub mod service;
pub mod traits;

pub use lock_registry::{LockRegistry, UserLockToken};
pub use service::{PointService, MIN_CHARGE_AMOUNT};
pub use traits::{BalanceStore, HistoryStore};
