//! Result Aggregator
//!
//! Accumulates totals and payoff events from each [`PeriodResult`] and turns
//! the finished trace into a [`SimulationResult`].
//!
//! Totals are kept at full precision while the run is in progress. Rounding
//! to cents happens once, in [`ResultAggregator::finish`].

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::time::{date_after_periods, PayoffDuration};
use crate::models::debt::Debt;
use crate::models::event::PayoffEvent;
use crate::models::state::PeriodResult;
use crate::orchestrator::engine::SimulationError;
use crate::policy::PayoffStrategy;

/// Round a monetary amount to cents, halves away from zero
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Running totals over a simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultAggregator {
    periods: usize,
    total_interest: Decimal,
    total_paid: Decimal,
    payoff_events: Vec<PayoffEvent>,
    schedule: Vec<PeriodResult>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one period into the totals
    pub fn record(&mut self, result: &PeriodResult) {
        self.periods = result.period;
        self.total_interest += result.total_interest();
        self.total_paid += result.total_paid();
        self.payoff_events.extend(result.payoffs.iter().cloned());
        self.schedule.push(result.clone());
    }

    /// Periods recorded so far
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Unrounded interest total
    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    /// Unrounded payment total
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Payoff events in chronological order
    pub fn payoff_events(&self) -> &[PayoffEvent] {
        &self.payoff_events
    }

    pub fn schedule(&self) -> &[PeriodResult] {
        &self.schedule
    }

    /// Totals so far, for diagnostics on runs that did not finish
    pub fn partial_trace(&self) -> PartialTrace {
        PartialTrace {
            periods: self.periods,
            total_interest: round_currency(self.total_interest),
            total_paid: round_currency(self.total_paid),
            payoff_events: self.payoff_events.clone(),
        }
    }

    /// Produce the reported result
    ///
    /// # Arguments
    ///
    /// * `strategy` - Strategy the run used
    /// * `extra_monthly_payment` - Extra budget the run started with
    /// * `priority_order` - Debts as initially ranked
    /// * `final_snowball` - Pool at completion
    /// * `now` - Start date; the debt-free date is `now` plus the period count in months
    ///
    /// # Errors
    ///
    /// [`SimulationError::CalendarOverflow`] if the debt-free date cannot be represented.
    pub fn finish(
        self,
        strategy: PayoffStrategy,
        extra_monthly_payment: Decimal,
        priority_order: Vec<Debt>,
        final_snowball: Decimal,
        now: NaiveDate,
    ) -> Result<SimulationResult, SimulationError> {
        let debt_free_date =
            date_after_periods(now, self.periods).ok_or(SimulationError::CalendarOverflow {
                start: now,
                periods: self.periods,
            })?;

        Ok(SimulationResult {
            strategy,
            extra_monthly_payment,
            total_periods: self.periods,
            duration: PayoffDuration::from_periods(self.periods),
            debt_free_date,
            total_interest: round_currency(self.total_interest),
            total_paid: round_currency(self.total_paid),
            payoff_events: self.payoff_events,
            final_snowball,
            priority_order,
            schedule: self.schedule,
        })
    }
}

/// What a run had achieved when it stopped short of completion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialTrace {
    pub periods: usize,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub payoff_events: Vec<PayoffEvent>,
}

/// Outcome of a completed payoff simulation
///
/// Monetary totals are rounded to cents. The per-period `schedule` keeps
/// full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub strategy: PayoffStrategy,
    pub extra_monthly_payment: Decimal,

    /// Periods (months) until every debt reached zero
    pub total_periods: usize,
    pub duration: PayoffDuration,
    pub debt_free_date: NaiveDate,

    pub total_interest: Decimal,
    pub total_paid: Decimal,

    /// One event per debt, chronological; same-period payoffs follow priority order
    pub payoff_events: Vec<PayoffEvent>,

    /// Pool at completion: extra payment plus every rolled-over minimum
    pub final_snowball: Decimal,

    /// Debts as ranked before the first period, with their starting balances
    pub priority_order: Vec<Debt>,

    /// Per-period amortization trace
    pub schedule: Vec<PeriodResult>,
}

impl SimulationResult {
    /// Period in which a debt was paid off
    pub fn payoff_period(&self, debt_id: &str) -> Option<usize> {
        self.payoff_events
            .iter()
            .find(|e| e.debt_id == debt_id)
            .map(|e| e.period)
    }

    /// Debt ids in the order they were eliminated
    pub fn payoff_order(&self) -> Vec<&str> {
        self.payoff_events
            .iter()
            .map(|e| e.debt_id.as_str())
            .collect()
    }

    /// Total original principal across all debts
    pub fn total_principal(&self) -> Decimal {
        self.priority_order.iter().map(Debt::original_balance).sum()
    }

    /// Payment history of one debt, one entry per period it was active
    pub fn debt_schedule(&self, debt_id: &str) -> Vec<(usize, &crate::models::state::DebtPayment)> {
        self.schedule
            .iter()
            .filter_map(|period| {
                period
                    .payments
                    .iter()
                    .find(|p| p.debt_id == debt_id)
                    .map(|p| (period.period, p))
            })
            .collect()
    }
}
