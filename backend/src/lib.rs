//! Debt Payoff Simulator Core - Rust Engine
//!
//! Multi-debt payoff simulation with deterministic execution: given debts and
//! an extra monthly budget, computes the month-by-month amortization of every
//! debt under an avalanche or snowball strategy, the order and timing of each
//! payoff, total interest, and time to debt-free.
//!
//! # Architecture
//!
//! - **core**: Period clock, durations, calendar conversion
//! - **models**: Domain types (Debt, SimulationState, events)
//! - **validation**: Input preconditions
//! - **policy**: Payoff strategies (priority ordering)
//! - **orchestrator**: Main simulation loop and result aggregation
//!
//! # Critical Invariants
//!
//! 1. All money values are `Decimal`, rounded to cents only when reported
//! 2. Runs are deterministic; the only clock input is the injected start date
//! 3. Debts are ranked once and never re-sorted mid-run
//! 4. FFI boundary is minimal and safe
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use debt_payoff_core_rs::{simulate, Debt, PayoffStrategy};
//! use rust_decimal_macros::dec;
//!
//! let debts = vec![
//!     Debt::new("Card", dec!(5000), dec!(150), dec!(20)).with_id("card"),
//!     Debt::new("Loan", dec!(1000), dec!(50), dec!(5)).with_id("loan"),
//! ];
//! let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! let result = simulate(&debts, PayoffStrategy::Snowball, dec!(200), now).unwrap();
//! assert_eq!(result.payoff_order(), vec!["loan", "card"]);
//! ```

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod validation;

// Re-exports for convenience
pub use crate::core::time::{PayoffDuration, PeriodClock};
pub use models::{
    debt::{Debt, DebtType, PAYOFF_EPSILON},
    event::{Event, EventLog, PayoffEvent},
    state::{DebtPayment, PeriodResult, SimulationState},
};
pub use orchestrator::{
    compare_strategies, simulate, DebtConfig, NonConvergentError, SimulationConfig,
    SimulationError, SimulationResult, Simulator, StrategyComparison, DEFAULT_MAX_PERIODS,
};
pub use policy::{order, PayoffStrategy, PriorityPolicy};
pub use validation::{
    validate, InvalidInputError, NonAmortizingDebtError, ValidDebtSet, MAX_AMOUNT, MAX_ANNUAL_RATE,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn debt_payoff_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    m.add_function(wrap_pyfunction!(ffi::simulator::simulate, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulator::compare_strategies, m)?)?;
    Ok(())
}
