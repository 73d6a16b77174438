//! Benchmark suite for per-user lock contention
//!
//! Compares the throughput of a workload funneled through a single user's
//! lock against the same workload spread across many users, using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use point_ledger::sim::{run, SimConfig};

fn main() {
    divan::main();
}

/// All workers contend on one user: every operation serializes
#[divan::bench]
fn contended_single_user() {
    let config = SimConfig::new(1, 4, 50, 1000, 500);
    divan::black_box(run(&config).expect("simulation failed"));
}

/// One user per worker: operations proceed in parallel
#[divan::bench]
fn parallel_distinct_users() {
    let config = SimConfig::new(4, 4, 50, 1000, 500);
    divan::black_box(run(&config).expect("simulation failed"));
}

/// Wider spread than workers: rotation still keeps contention low
#[divan::bench]
fn parallel_many_users() {
    let config = SimConfig::new(16, 4, 50, 1000, 500);
    divan::black_box(run(&config).expect("simulation failed"));
}
