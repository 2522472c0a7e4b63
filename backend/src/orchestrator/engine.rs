//! Simulator Engine
//!
//! Main simulation loop integrating all components:
//! - Input validation (preconditions checked before period 1)
//! - Priority ordering (strategy applied once)
//! - Period transitions (interest, payments, payoffs, pool rollover)
//! - Result aggregation (totals, payoff events, schedule)
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! ```text
//! Simulator::new:
//! 1. Validate debts and extra payment
//! 2. Rank debts under the strategy (fixed for the whole run)
//! 3. Seed the snowball pool with the extra payment
//!
//! For each period t:
//! 1. Stop with NonConvergent if the period cap is reached
//! 2. SimulationState::step (interest → payment → cap → payoff → rollover)
//! 3. Record totals and payoff events
//! 4. Log events
//! 5. Advance the clock
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use debt_payoff_core_rs::orchestrator::{SimulationConfig, Simulator};
//! use debt_payoff_core_rs::{Debt, PayoffStrategy};
//! use rust_decimal_macros::dec;
//!
//! let config = SimulationConfig::new(
//!     vec![
//!         Debt::new("Card", dec!(5000), dec!(150), dec!(20)).with_id("card"),
//!         Debt::new("Loan", dec!(1000), dec!(50), dec!(5)).with_id("loan"),
//!     ],
//!     PayoffStrategy::Avalanche,
//!     dec!(200),
//! );
//!
//! let mut simulator = Simulator::new(config).unwrap();
//! let first = simulator.step().unwrap();
//! assert_eq!(first.target_debt_id.as_deref(), Some("card"));
//!
//! let result = simulator
//!     .finish(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
//!     .unwrap();
//! assert_eq!(result.payoff_order(), vec!["card", "loan"]);
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::time::PeriodClock;
use crate::models::debt::{Debt, DebtType};
use crate::models::event::{Event, EventLog};
use crate::models::state::{PeriodResult, SimulationState};
use crate::orchestrator::aggregator::{
    round_currency, PartialTrace, ResultAggregator, SimulationResult,
};
use crate::orchestrator::checkpoint::{compute_config_hash, validate_snapshot, StateSnapshot};
use crate::policy::{order, PayoffStrategy};
use crate::validation::{validate, InvalidInputError, MAX_AMOUNT};

/// Hard cap on simulated periods (50 years)
pub const DEFAULT_MAX_PERIODS: usize = 600;

fn default_max_periods() -> usize {
    DEFAULT_MAX_PERIODS
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Debts to pay off, in the caller's order (used for tie-breaks)
    pub debts: Vec<Debt>,

    /// Which debt gets the snowball pool first
    pub strategy: PayoffStrategy,

    /// Budget on top of all minimum payments, every period
    ///
    /// Any positive amount, however small, also turns on rollover of freed minimums.
    pub extra_monthly_payment: Decimal,

    /// Periods after which the run fails instead of continuing
    #[serde(default = "default_max_periods")]
    pub max_periods: usize,
}

impl SimulationConfig {
    pub fn new(debts: Vec<Debt>, strategy: PayoffStrategy, extra_monthly_payment: Decimal) -> Self {
        Self {
            debts,
            strategy,
            extra_monthly_payment,
            max_periods: DEFAULT_MAX_PERIODS,
        }
    }

    pub fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Same debts and budget under another strategy
    pub fn with_strategy(mut self, strategy: PayoffStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Caller-facing description of one debt
///
/// Unlike [`Debt`], the id is optional (a UUID is generated when missing) and
/// the category defaults to `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub balance: Decimal,
    pub minimum_payment: Decimal,
    pub annual_interest_rate: Decimal,
    #[serde(default)]
    pub debt_type: DebtType,
}

impl From<DebtConfig> for Debt {
    fn from(config: DebtConfig) -> Self {
        let debt = Debt::new(
            config.name,
            config.balance,
            config.minimum_payment,
            config.annual_interest_rate,
        )
        .with_type(config.debt_type);

        match config.id {
            Some(id) => debt.with_id(id),
            None => debt,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Balance left on a debt when a run stopped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingDebt {
    pub debt_id: String,
    pub balance: Decimal,
}

/// The period cap was reached with debts still owed
#[derive(Debug, Clone, Error, PartialEq)]
#[error(
    "Simulation did not converge within {max_periods} periods ({} debts still owed)",
    .remaining_debts.len()
)]
pub struct NonConvergentError {
    pub max_periods: usize,
    pub remaining_debts: Vec<RemainingDebt>,
    pub partial: PartialTrace,
}

/// Errors returned by the simulator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    NonConvergent(Box<NonConvergentError>),

    #[error("Simulation already complete after {period} periods")]
    SimulationComplete { period: usize },

    #[error("Debt-free date is out of calendar range ({periods} months after {start})")]
    CalendarOverflow { start: NaiveDate, periods: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State validation error: {0}")]
    StateValidationError(String),
}

impl SimulationError {
    /// The non-amortizing debt behind this error, if that is the cause
    pub fn non_amortizing(&self) -> Option<&crate::validation::NonAmortizingDebtError> {
        match self {
            SimulationError::InvalidInput(InvalidInputError::NonAmortizing(err)) => Some(err),
            _ => None,
        }
    }

    pub fn is_non_convergent(&self) -> bool {
        matches!(self, SimulationError::NonConvergent(_))
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Period-by-period payoff engine
///
/// Owns its working copy of the debts; the caller's config is never mutated.
#[derive(Debug, Clone)]
pub struct Simulator {
    strategy: PayoffStrategy,
    extra_monthly_payment: Decimal,
    max_periods: usize,
    config_hash: String,

    clock: PeriodClock,

    /// Debts as ranked before period 1, with starting balances
    priority_order: Vec<Debt>,

    state: SimulationState,
    aggregator: ResultAggregator,
    event_log: EventLog,
}

impl Simulator {
    /// Create a simulator from configuration
    ///
    /// # Errors
    ///
    /// * [`SimulationError::InvalidInput`] - any validation failure, including a
    ///   non-amortizing debt, a negative extra payment, or a zero period cap
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let (priority_order, config_hash) = Self::prepare(&config)?;

        // Freed minimums only roll over when a snowball is actually running
        let rollover = config.extra_monthly_payment > Decimal::ZERO;
        let state = SimulationState::new(
            priority_order.clone(),
            config.extra_monthly_payment,
            rollover,
        );

        tracing::info!(
            strategy = %config.strategy,
            num_debts = priority_order.len(),
            extra_monthly_payment = %config.extra_monthly_payment,
            max_periods = config.max_periods,
            "Starting payoff simulation"
        );

        Ok(Self {
            strategy: config.strategy,
            extra_monthly_payment: config.extra_monthly_payment,
            max_periods: config.max_periods,
            config_hash,
            clock: PeriodClock::new(),
            priority_order,
            state,
            aggregator: ResultAggregator::new(),
            event_log: EventLog::new(),
        })
    }

    /// Validate a config and rank its debts
    fn prepare(config: &SimulationConfig) -> Result<(Vec<Debt>, String), SimulationError> {
        if config.extra_monthly_payment < Decimal::ZERO {
            return Err(InvalidInputError::NegativeExtraPayment {
                amount: config.extra_monthly_payment,
            }
            .into());
        }

        if config.extra_monthly_payment > MAX_AMOUNT {
            return Err(InvalidInputError::ExtraPaymentTooLarge {
                amount: config.extra_monthly_payment,
            }
            .into());
        }

        if config.max_periods == 0 {
            return Err(InvalidInputError::ZeroMaxPeriods.into());
        }

        let valid = validate(&config.debts)?;
        let priority_order = order(&valid, config.strategy);
        let config_hash = compute_config_hash(config)?;

        Ok((priority_order, config_hash))
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute one period
    ///
    /// # Errors
    ///
    /// * [`SimulationError::SimulationComplete`] - every debt is already paid off
    /// * [`SimulationError::NonConvergent`] - the period cap has been reached
    pub fn step(&mut self) -> Result<PeriodResult, SimulationError> {
        if self.state.is_complete() {
            return Err(SimulationError::SimulationComplete {
                period: self.current_period(),
            });
        }

        if self.current_period() >= self.max_periods {
            return Err(self.non_convergent());
        }

        let (next, result) = self.state.step();
        self.state = next;
        self.clock.advance_period();
        debug_assert_eq!(self.clock.current_period(), self.state.period());

        self.aggregator.record(&result);
        self.log_period(&result);

        if self.clock.is_end_of_year() {
            tracing::debug!(
                year = self.clock.current_year(),
                remaining_balance = %round_currency(self.state.total_balance()),
                active_debts = self.state.num_active(),
                "Year complete"
            );
        }

        Ok(result)
    }

    /// Step until every debt is paid off
    ///
    /// # Errors
    ///
    /// [`SimulationError::NonConvergent`] if the period cap is reached first.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        while !self.state.is_complete() {
            self.step()?;
        }
        Ok(())
    }

    /// Run to completion and produce the reported result
    ///
    /// `now` is the start date used for the debt-free date.
    pub fn finish(mut self, now: NaiveDate) -> Result<SimulationResult, SimulationError> {
        self.run()?;

        self.aggregator.finish(
            self.strategy,
            self.extra_monthly_payment,
            self.priority_order,
            self.state.snowball_pool(),
            now,
        )
    }

    fn non_convergent(&self) -> SimulationError {
        let remaining_debts: Vec<RemainingDebt> = self
            .state
            .active_debts()
            .map(|d| RemainingDebt {
                debt_id: d.id().to_string(),
                balance: round_currency(d.balance()),
            })
            .collect();

        tracing::warn!(
            max_periods = self.max_periods,
            remaining = remaining_debts.len(),
            "Payoff simulation did not converge"
        );

        SimulationError::NonConvergent(Box::new(NonConvergentError {
            max_periods: self.max_periods,
            remaining_debts,
            partial: self.aggregator.partial_trace(),
        }))
    }

    fn log_period(&mut self, result: &PeriodResult) {
        let period = result.period;

        for payment in &result.payments {
            self.event_log.log(Event::PaymentApplied {
                period,
                debt_id: payment.debt_id.clone(),
                interest: payment.interest,
                payment: payment.payment,
                snowball_portion: payment.snowball_portion,
                balance_after: payment.balance_after,
            });
        }

        let mut pool = result.snowball_pool;
        for payoff in &result.payoffs {
            tracing::debug!(debt_id = %payoff.debt_id, period, "Debt paid off");
            self.event_log.log(Event::DebtPaidOff {
                period,
                debt_id: payoff.debt_id.clone(),
                payoff_amount: payoff.payoff_amount,
            });

            if !self.state.rollover_enabled() {
                continue;
            }

            let freed = self
                .state
                .debt(&payoff.debt_id)
                .map(Debt::minimum_payment)
                .unwrap_or_default();
            pool += freed;

            tracing::debug!(
                debt_id = %payoff.debt_id,
                period,
                new_pool = %pool,
                "Snowball increased"
            );
            self.event_log.log(Event::SnowballIncreased {
                period,
                debt_id: payoff.debt_id.clone(),
                freed_amount: freed,
                new_pool: pool,
            });
        }

        if self.state.is_complete() {
            tracing::info!(
                periods = period,
                total_interest = %round_currency(self.aggregator.total_interest()),
                "All debts paid off"
            );
            self.event_log.log(Event::SimulationCompleted {
                period,
                total_interest: self.aggregator.total_interest(),
                total_paid: self.aggregator.total_paid(),
            });
        }
    }

    // ========================================================================
    // Checkpoints
    // ========================================================================

    /// Serialize the current state to JSON
    ///
    /// The event log is not part of a checkpoint.
    pub fn save_state(&self) -> Result<String, SimulationError> {
        let snapshot = StateSnapshot::capture(
            &self.state,
            &self.aggregator,
            self.config_hash.clone(),
        );

        serde_json::to_string(&snapshot).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot serialization failed: {}", e))
        })
    }

    /// Resume a simulation from [`Simulator::save_state`] output
    ///
    /// `config` must be the config the checkpoint was taken from.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::SerializationError`] - malformed JSON
    /// * [`SimulationError::StateValidationError`] - config mismatch or corrupt state
    pub fn load_state(config: SimulationConfig, state_json: &str) -> Result<Self, SimulationError> {
        let snapshot: StateSnapshot = serde_json::from_str(state_json).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot deserialization failed: {}", e))
        })?;

        let (priority_order, config_hash) = Self::prepare(&config)?;

        if snapshot.config_hash != config_hash {
            return Err(SimulationError::StateValidationError(
                "Checkpoint was taken from a different config".to_string(),
            ));
        }

        validate_snapshot(&snapshot, &priority_order, config.extra_monthly_payment)?;

        let (state, aggregator) = snapshot.restore();

        tracing::info!(period = state.period(), "Restored payoff simulation from checkpoint");

        Ok(Self {
            strategy: config.strategy,
            extra_monthly_payment: config.extra_monthly_payment,
            max_periods: config.max_periods,
            config_hash,
            clock: PeriodClock::at(state.period()),
            priority_order,
            state,
            aggregator,
            event_log: EventLog::new(),
        })
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn strategy(&self) -> PayoffStrategy {
        self.strategy
    }

    pub fn current_period(&self) -> usize {
        self.clock.current_period()
    }

    pub fn max_periods(&self) -> usize {
        self.max_periods
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn snowball_pool(&self) -> Decimal {
        self.state.snowball_pool()
    }

    /// Current working balance of a debt
    pub fn debt_balance(&self, debt_id: &str) -> Option<Decimal> {
        self.state.debt(debt_id).map(Debt::balance)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn priority_order(&self) -> &[Debt] {
        &self.priority_order
    }

    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }
}

/// Run a complete payoff simulation
///
/// Validates `debts`, ranks them under `strategy`, and simulates until every
/// debt is paid off. `now` is only used for the calendar debt-free date.
///
/// # Errors
///
/// * [`SimulationError::InvalidInput`] - bad input, checked before period 1
/// * [`SimulationError::NonConvergent`] - more than [`DEFAULT_MAX_PERIODS`] periods needed
pub fn simulate(
    debts: &[Debt],
    strategy: PayoffStrategy,
    extra_monthly_payment: Decimal,
    now: NaiveDate,
) -> Result<SimulationResult, SimulationError> {
    let config = SimulationConfig::new(debts.to_vec(), strategy, extra_monthly_payment);
    Simulator::new(config)?.finish(now)
}
