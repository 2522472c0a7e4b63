//! Schedule command implementation
//!
//! Prints the month-by-month amortization table.

use debt_payoff_core_rs::Simulator;
use tracing::info;

use crate::config::Scenario;
use crate::output::{render_schedule, OutputFormat};
use crate::{CliError, Result};

/// Run the schedule command
pub fn run(scenario: Scenario, debt_id: Option<&str>, format: OutputFormat) -> Result<()> {
    if let Some(id) = debt_id {
        info!("  Debt: {}", id);
        let known = scenario.config.debts.iter().any(|d| d.id() == id);
        if !known {
            return Err(CliError::InvalidArgument(format!("Unknown debt id: {}", id)));
        }
    }

    let result = Simulator::new(scenario.config)?.finish(scenario.start_date)?;
    println!("{}", render_schedule(&result, debt_id, format)?);

    Ok(())
}
