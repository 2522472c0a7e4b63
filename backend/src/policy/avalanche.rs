//! Avalanche Policy
//!
//! Pay the most expensive debt first.
//!
//! # Behavior
//!
//! - Ranks debts by annual interest rate, highest first
//! - Equal rates keep input order
//! - Minimizes total interest for a fixed monthly budget

use std::cmp::Ordering;

use super::PriorityPolicy;
use crate::models::debt::Debt;

/// Avalanche policy: descending annual interest rate
///
/// # Example
///
/// ```
/// use debt_payoff_core_rs::policy::{AvalanchePolicy, PriorityPolicy};
/// use debt_payoff_core_rs::{validate, Debt};
/// use rust_decimal_macros::dec;
///
/// let debts = validate(&[
///     Debt::new("Car", dec!(8000), dec!(250), dec!(6.5)).with_id("car"),
///     Debt::new("Card", dec!(3000), dec!(90), dec!(22.9)).with_id("card"),
/// ])
/// .unwrap();
///
/// let ranked = AvalanchePolicy.order(&debts);
/// assert_eq!(ranked[0].id(), "card");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AvalanchePolicy;

impl PriorityPolicy for AvalanchePolicy {
    fn name(&self) -> &'static str {
        "avalanche"
    }

    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        b.annual_interest_rate().cmp(&a.annual_interest_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_rates_keep_input_order() {
        let debts = validate(&[
            Debt::new("First", dec!(100), dec!(10), dec!(10)).with_id("first"),
            Debt::new("High", dec!(100), dec!(10), dec!(20)).with_id("high"),
            Debt::new("Second", dec!(50), dec!(10), dec!(10)).with_id("second"),
        ])
        .unwrap();

        let ids: Vec<_> = AvalanchePolicy
            .order(&debts)
            .iter()
            .map(|d| d.id().to_string())
            .collect();

        assert_eq!(ids, vec!["high", "first", "second"]);
    }
}
