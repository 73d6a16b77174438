use crate::sim::SimConfig;
use crate::types::Points;
use clap::Parser;

/// Drive a concurrent point workload and print final balances as CSV
#[derive(Parser, Debug)]
#[command(name = "point-ledger")]
#[command(about = "Concurrent point balance workload driver", long_about = None)]
pub struct CliArgs {
    /// Number of distinct users in the workload
    #[arg(
        long = "users",
        value_name = "COUNT",
        default_value_t = 4,
        help = "Number of distinct users targeted by the workload"
    )]
    pub users: u32,

    /// Number of worker threads issuing operations
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Operations issued per worker
    #[arg(
        long = "rounds",
        value_name = "COUNT",
        default_value_t = 24,
        help = "Operations issued per worker"
    )]
    pub rounds: u32,

    /// Amount for every charge
    #[arg(
        long = "charge-amount",
        value_name = "POINTS",
        default_value_t = 1000,
        help = "Points added per charge (minimum 1000)"
    )]
    pub charge_amount: Points,

    /// Amount for every use
    #[arg(
        long = "use-amount",
        value_name = "POINTS",
        default_value_t = 500,
        help = "Points subtracted per use"
    )]
    pub use_amount: Points,
}

impl CliArgs {
    /// Create a SimConfig from CLI arguments
    ///
    /// Missing worker count falls back to the CPU core count; zero or
    /// out-of-range values fall back to the simulator defaults.
    ///
    /// # Returns
    ///
    /// A `SimConfig` with values from CLI arguments or defaults.
    pub fn to_sim_config(&self) -> SimConfig {
        SimConfig::new(
            self.users,
            self.workers.unwrap_or_else(num_cpus::get),
            self.rounds,
            self.charge_amount,
            self.use_amount,
        )
    }
}
