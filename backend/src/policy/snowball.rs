//! Snowball Policy
//!
//! Pay the smallest debt first.
//!
//! # Behavior
//!
//! - Ranks debts by original balance, smallest first
//! - Equal balances keep input order
//! - Interest rates are ignored

use std::cmp::Ordering;

use super::PriorityPolicy;
use crate::models::debt::Debt;

/// Snowball policy: ascending original balance
///
/// # Example
///
/// ```
/// use debt_payoff_core_rs::policy::{PriorityPolicy, SnowballPolicy};
/// use debt_payoff_core_rs::{validate, Debt};
/// use rust_decimal_macros::dec;
///
/// let debts = validate(&[
///     Debt::new("Card", dec!(3000), dec!(90), dec!(22.9)).with_id("card"),
///     Debt::new("Medical", dec!(400), dec!(25), dec!(0)).with_id("medical"),
/// ])
/// .unwrap();
///
/// let ranked = SnowballPolicy.order(&debts);
/// assert_eq!(ranked[0].id(), "medical");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SnowballPolicy;

impl PriorityPolicy for SnowballPolicy {
    fn name(&self) -> &'static str {
        "snowball"
    }

    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        a.original_balance().cmp(&b.original_balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ignores_interest_rate() {
        let debts = validate(&[
            Debt::new("Big expensive", dec!(9000), dec!(300), dec!(29.9)).with_id("big"),
            Debt::new("Small cheap", dec!(200), dec!(20), dec!(1)).with_id("small"),
        ])
        .unwrap();

        let ranked = SnowballPolicy.order(&debts);
        assert_eq!(ranked[0].id(), "small");
        assert_eq!(ranked[1].id(), "big");
    }
}
