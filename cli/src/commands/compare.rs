//! Compare command implementation
//!
//! Runs avalanche, snowball and minimum-only over the same scenario.

use debt_payoff_core_rs::compare_strategies;
use tracing::info;

use crate::config::Scenario;
use crate::output::{render_comparison, OutputFormat};
use crate::Result;

/// Run the compare command
pub fn run(scenario: Scenario, format: OutputFormat) -> Result<()> {
    info!("Comparing strategies...");
    info!("  Debts: {}", scenario.config.debts.len());
    info!("  Extra payment: {}", scenario.config.extra_monthly_payment);

    let comparison = compare_strategies(
        &scenario.config.debts,
        scenario.config.extra_monthly_payment,
        scenario.start_date,
    )?;
    println!("{}", render_comparison(&comparison, format)?);

    Ok(())
}
