//! Simulation State
//!
//! Represents the complete state of a payoff simulation between periods:
//! the working debts in priority order, the snowball pool, and the number of
//! periods completed.
//!
//! # Critical Invariants
//!
//! 1. **Fixed Ranking**: `debts` stays in the order the strategy produced; it is never re-sorted
//! 2. **Monotonic Balances**: a debt's balance never increases, and once zero stays zero
//! 3. **Pool Growth**: the pool only grows, by a paid-off debt's minimum payment
//! 4. **Single Target**: at most one debt per period receives the pool

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::debt::Debt;
use crate::models::event::PayoffEvent;

/// What happened to one debt during one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayment {
    pub debt_id: String,
    pub balance_before: Decimal,
    pub interest: Decimal,
    /// Amount actually paid, after capping at balance + interest
    pub payment: Decimal,
    /// Part of `payment` that came from the snowball pool
    pub snowball_portion: Decimal,
    pub balance_after: Decimal,
}

impl DebtPayment {
    /// Principal reduction this period
    pub fn principal(&self) -> Decimal {
        self.payment - self.interest
    }
}

/// Outcome of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodResult {
    /// Period number (1-indexed)
    pub period: usize,

    /// One entry per debt that was active at the start of the period, in priority order
    pub payments: Vec<DebtPayment>,

    /// Debts that reached zero this period
    pub payoffs: Vec<PayoffEvent>,

    /// Pool available at the start of the period
    pub snowball_pool: Decimal,

    /// Pool after this period's payoffs were rolled in
    pub snowball_pool_after: Decimal,

    /// Debt that received the pool, if any
    pub target_debt_id: Option<String>,
}

impl PeriodResult {
    pub fn total_interest(&self) -> Decimal {
        self.payments.iter().map(|p| p.interest).sum()
    }

    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.payment).sum()
    }

    /// Sum of balances still owed at the end of the period
    pub fn remaining_balance(&self) -> Decimal {
        self.payments.iter().map(|p| p.balance_after).sum()
    }
}

/// Complete simulation state
///
/// # Example
///
/// ```rust
/// use debt_payoff_core_rs::{Debt, SimulationState};
/// use rust_decimal_macros::dec;
///
/// let state = SimulationState::new(
///     vec![Debt::new("Card", dec!(1000), dec!(50), dec!(12)).with_id("card")],
///     dec!(100),
///     true,
/// );
///
/// let (next, result) = state.step();
/// assert_eq!(result.period, 1);
/// assert_eq!(result.payments[0].payment, dec!(150));
/// assert_eq!(next.debt("card").unwrap().balance(), dec!(860));
/// assert_eq!(state.period(), 0); // the previous snapshot is untouched
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Periods completed so far
    period: usize,

    /// Working debts in the fixed priority order
    debts: Vec<Debt>,

    /// Extra payment plus rolled-over minimums, paid to the top active debt
    snowball_pool: Decimal,

    /// Whether freed minimum payments roll into the pool
    rollover_enabled: bool,
}

impl SimulationState {
    /// Create the initial state
    ///
    /// # Arguments
    ///
    /// * `ranked_debts` - Working copies in priority order
    /// * `snowball_pool` - Starting pool (the extra monthly payment)
    /// * `rollover_enabled` - Whether paid-off minimums join the pool
    pub fn new(ranked_debts: Vec<Debt>, snowball_pool: Decimal, rollover_enabled: bool) -> Self {
        Self {
            period: 0,
            debts: ranked_debts,
            snowball_pool,
            rollover_enabled,
        }
    }

    /// Rebuild a state from checkpoint data
    pub fn from_parts(
        period: usize,
        debts: Vec<Debt>,
        snowball_pool: Decimal,
        rollover_enabled: bool,
    ) -> Self {
        Self {
            period,
            debts,
            snowball_pool,
            rollover_enabled,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn debt(&self, debt_id: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id() == debt_id)
    }

    pub fn snowball_pool(&self) -> Decimal {
        self.snowball_pool
    }

    pub fn rollover_enabled(&self) -> bool {
        self.rollover_enabled
    }

    pub fn active_debts(&self) -> impl Iterator<Item = &Debt> {
        self.debts.iter().filter(|d| !d.is_paid_off())
    }

    pub fn num_active(&self) -> usize {
        self.active_debts().count()
    }

    /// True once every balance is zero
    pub fn is_complete(&self) -> bool {
        self.debts.iter().all(Debt::is_paid_off)
    }

    pub fn total_balance(&self) -> Decimal {
        self.debts.iter().map(Debt::balance).sum()
    }

    /// Index of the debt that receives the pool: first active entry in the ranking
    pub fn target_index(&self) -> Option<usize> {
        self.debts.iter().position(|d| !d.is_paid_off())
    }

    // ========================================================================
    // Transition
    // ========================================================================

    /// Advance one period, returning the next state and what happened
    ///
    /// For each debt active at the start of the period, in priority order:
    /// accrue interest, pay the minimum (plus the pool for the target debt),
    /// cap at balance + interest, and reduce the balance. Debts that reach
    /// zero emit a [`PayoffEvent`] and, when rollover is enabled, add their
    /// minimum payment to the pool for subsequent periods.
    ///
    /// `self` is not modified.
    pub fn step(&self) -> (SimulationState, PeriodResult) {
        let mut next = self.clone();
        next.period += 1;

        let period = next.period;
        let pool = self.snowball_pool;
        let target = self.target_index();

        let mut payments = Vec::with_capacity(self.debts.len());
        let mut payoffs = Vec::new();
        let mut freed = Decimal::ZERO;

        for (index, debt) in next.debts.iter_mut().enumerate() {
            if debt.is_paid_off() {
                continue;
            }

            let snowball = if Some(index) == target {
                pool
            } else {
                Decimal::ZERO
            };
            let scheduled = debt.minimum_payment() + snowball;

            let balance_before = debt.balance();
            let (paid, interest) = debt.apply_period(scheduled);

            // The minimum is paid before any pool money
            let snowball_portion = (paid - debt.minimum_payment()).max(Decimal::ZERO);

            payments.push(DebtPayment {
                debt_id: debt.id().to_string(),
                balance_before,
                interest,
                payment: paid,
                snowball_portion,
                balance_after: debt.balance(),
            });

            if debt.is_paid_off() {
                payoffs.push(PayoffEvent {
                    debt_id: debt.id().to_string(),
                    period,
                    payoff_amount: debt.original_balance(),
                });
                freed += debt.minimum_payment();
            }
        }

        if self.rollover_enabled {
            next.snowball_pool += freed;
        }

        let result = PeriodResult {
            period,
            payments,
            payoffs,
            snowball_pool: pool,
            snowball_pool_after: next.snowball_pool,
            target_debt_id: target.map(|i| self.debts[i].id().to_string()),
        };

        (next, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_debts() -> Vec<Debt> {
        vec![
            Debt::new("Small", dec!(100), dec!(50), dec!(0)).with_id("small"),
            Debt::new("Large", dec!(1000), dec!(100), dec!(0)).with_id("large"),
        ]
    }

    #[test]
    fn test_pool_goes_to_first_active_debt_only() {
        let state = SimulationState::new(two_debts(), dec!(25), true);
        let (_, result) = state.step();

        assert_eq!(result.target_debt_id.as_deref(), Some("small"));
        assert_eq!(result.payments[0].payment, dec!(75));
        assert_eq!(result.payments[0].snowball_portion, dec!(25));
        assert_eq!(result.payments[1].payment, dec!(100));
        assert_eq!(result.payments[1].snowball_portion, dec!(0));
    }

    #[test]
    fn test_freed_minimum_applies_from_next_period() {
        let state = SimulationState::new(two_debts(), dec!(50), true);

        // Period 1: small pays 100 and is gone
        let (state, first) = state.step();
        assert_eq!(first.payoffs.len(), 1);
        assert_eq!(first.payoffs[0].debt_id, "small");
        assert_eq!(first.payments[1].payment, dec!(100));
        assert_eq!(state.snowball_pool(), dec!(100));

        // Period 2: large receives its minimum plus extra plus small's minimum
        let (_, second) = state.step();
        assert_eq!(second.payments.len(), 1);
        assert_eq!(second.payments[0].payment, dec!(200));
        assert_eq!(second.target_debt_id.as_deref(), Some("large"));
    }

    #[test]
    fn test_rollover_disabled_keeps_pool() {
        let state = SimulationState::new(two_debts(), dec!(0), false);
        let (state, first) = state.step();

        assert_eq!(first.payoffs.len(), 0);
        let (state, second) = state.step();
        assert_eq!(second.payoffs.len(), 1);
        assert_eq!(state.snowball_pool(), dec!(0));
    }

    #[test]
    fn test_paid_off_debts_are_skipped() {
        let state = SimulationState::new(two_debts(), dec!(50), true);
        let (state, _) = state.step();
        let (_, result) = state.step();

        assert!(result.payments.iter().all(|p| p.debt_id != "small"));
    }

    #[test]
    fn test_complete_when_all_zero() {
        let state = SimulationState::new(
            vec![Debt::new("Tiny", dec!(10), dec!(50), dec!(5)).with_id("tiny")],
            dec!(0),
            false,
        );
        assert!(!state.is_complete());

        let (state, result) = state.step();
        assert!(state.is_complete());
        assert_eq!(state.target_index(), None);
        assert_eq!(result.remaining_balance(), dec!(0));
    }
}
