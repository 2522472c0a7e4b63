//! Rendering results as tables or JSON

use clap::ValueEnum;
use debt_payoff_core_rs::{PayoffStrategy, SimulationResult, StrategyComparison};
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::Result;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn name_of<'a>(result: &'a SimulationResult, debt_id: &'a str) -> &'a str {
    result
        .priority_order
        .iter()
        .find(|d| d.id() == debt_id)
        .map(|d| d.name())
        .unwrap_or(debt_id)
}

pub fn render_result(result: &SimulationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Table => Ok(result_table(result)),
    }
}

fn result_table(result: &SimulationResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Strategy:         {}", result.strategy);
    let _ = writeln!(out, "Extra payment:    {}", money(result.extra_monthly_payment));
    let _ = writeln!(
        out,
        "Debt-free in:     {} ({} months)",
        result.duration, result.total_periods
    );
    let _ = writeln!(out, "Debt-free date:   {}", result.debt_free_date.format("%B %Y"));
    let _ = writeln!(out, "Total interest:   {}", money(result.total_interest));
    let _ = writeln!(out, "Total paid:       {}", money(result.total_paid));
    let _ = writeln!(out, "Final snowball:   {}", money(result.final_snowball));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<4} {:<24} {:>12} {:>8} {:>8}",
        "#", "Debt", "Balance", "Rate %", "Paid in"
    );

    for (rank, debt) in result.priority_order.iter().enumerate() {
        let paid_in = result
            .payoff_period(debt.id())
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<4} {:<24} {:>12} {:>8} {:>8}",
            rank + 1,
            debt.name(),
            money(debt.original_balance()),
            debt.annual_interest_rate(),
            paid_in
        );
    }

    out
}

pub fn render_comparison(comparison: &StrategyComparison, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(comparison)?);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>8} {:>14} {:>14}",
        "Strategy", "Months", "Interest", "Total paid"
    );

    for strategy in PayoffStrategy::ALL {
        let result = comparison.result(strategy);
        let _ = writeln!(
            out,
            "{:<14} {:>8} {:>14} {:>14}",
            strategy.as_str(),
            result.total_periods,
            money(result.total_interest),
            money(result.total_paid)
        );
    }

    match &comparison.minimum_only {
        Some(baseline) => {
            let _ = writeln!(
                out,
                "{:<14} {:>8} {:>14} {:>14}",
                "minimum only",
                baseline.total_periods,
                money(baseline.total_interest),
                money(baseline.total_paid)
            );
        }
        None => {
            let _ = writeln!(out, "{:<14} {:>8}", "minimum only", "never");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended: {}", comparison.recommended);
    if let Some(saved) = comparison.interest_saved(comparison.recommended) {
        let _ = writeln!(out, "Interest saved vs minimum payments: {}", money(saved));
    }

    Ok(out)
}

/// Month-by-month table, optionally for a single debt
pub fn render_schedule(
    result: &SimulationResult,
    debt_id: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(match debt_id {
            Some(id) => serde_json::to_string_pretty(&result.debt_schedule(id))?,
            None => serde_json::to_string_pretty(&result.schedule)?,
        });
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:<24} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Debt", "Payment", "Interest", "Principal", "Balance"
    );

    for period in &result.schedule {
        for payment in &period.payments {
            if debt_id.is_some_and(|id| id != payment.debt_id) {
                continue;
            }
            let _ = writeln!(
                out,
                "{:>6} {:<24} {:>12} {:>12} {:>12} {:>12}",
                period.period,
                name_of(result, &payment.debt_id),
                money(payment.payment),
                money(payment.interest),
                money(payment.principal()),
                money(payment.balance_after)
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use debt_payoff_core_rs::{simulate, Debt};
    use rust_decimal_macros::dec;

    fn result() -> SimulationResult {
        let debts = vec![Debt::new("Card", dec!(300), dec!(100), dec!(12)).with_id("card")];
        let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        simulate(&debts, PayoffStrategy::Avalanche, dec!(0), now).unwrap()
    }

    #[test]
    fn test_table_lists_debts() {
        let table = render_result(&result(), OutputFormat::Table).unwrap();
        assert!(table.contains("Card"));
        assert!(table.contains("300.00"));
        assert!(table.contains("avalanche"));
    }

    #[test]
    fn test_schedule_has_row_per_month() {
        let result = result();
        let table = render_schedule(&result, Some("card"), OutputFormat::Table).unwrap();
        // Header plus one row per period
        assert_eq!(table.lines().count(), result.total_periods + 1);
    }

    #[test]
    fn test_json_output_parses() {
        let json = render_result(&result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["strategy"], "avalanche");
    }
}
