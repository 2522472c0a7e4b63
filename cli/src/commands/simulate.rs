//! Simulate command implementation
//!
//! Runs one strategy over a scenario file and prints the summary.

use debt_payoff_core_rs::Simulator;
use tracing::info;

use crate::config::Scenario;
use crate::output::{render_result, OutputFormat};
use crate::Result;

/// Run the simulate command
pub fn run(scenario: Scenario, format: OutputFormat) -> Result<()> {
    info!("Starting simulation...");
    info!("  Strategy: {}", scenario.config.strategy);
    info!("  Debts: {}", scenario.config.debts.len());
    info!("  Extra payment: {}", scenario.config.extra_monthly_payment);
    info!("  Start date: {}", scenario.start_date);

    let result = Simulator::new(scenario.config)?.finish(scenario.start_date)?;
    println!("{}", render_result(&result, format)?);

    info!("Simulation complete");
    Ok(())
}
