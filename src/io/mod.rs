//! I/O module
//!
//! Handles CSV output of final balance records for the CLI binary.

use crate::types::UserBalance;
use std::io::Write;

/// Write balance records to CSV format
///
/// Writes balances with columns: user_id, points, updated_at.
/// Records are sorted by user id for deterministic output; timestamps are
/// rendered as RFC 3339.
///
/// # Arguments
///
/// * `balances` - Slice of balance records to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(balances: &[UserBalance], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["user_id", "points", "updated_at"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Sort by user id for deterministic output
    let mut sorted_balances = balances.to_vec();
    sorted_balances.sort_by_key(|balance| balance.user_id);

    for balance in sorted_balances {
        writer
            .write_record(&[
                balance.user_id.to_string(),
                balance.points.to_string(),
                balance.updated_at.to_rfc3339(),
            ])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
