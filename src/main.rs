//! Point Ledger CLI
//!
//! Command-line driver that runs a concurrent charge/use workload against
//! the point service and prints the final balances as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- > balances.csv
//! cargo run -- --users 8 --workers 4 --rounds 50 > balances.csv
//! cargo run -- --charge-amount 2000 --use-amount 750 > balances.csv
//! ```
//!
//! Logs go to stderr (controlled via `RUST_LOG`); the CSV report goes to
//! stdout.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (simulation worker fault, output not writable, etc.)

use point_ledger::cli;
use point_ledger::io::write_balances_csv;
use point_ledger::sim;
use std::process;

fn main() {
    // Logs must not interleave with the CSV report on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let config = args.to_sim_config();

    let report = match sim::run(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut output = std::io::stdout();
    if let Err(e) = write_balances_csv(&report.balances, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
