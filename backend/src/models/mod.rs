//! Domain models for the debt payoff simulator

pub mod debt;
pub mod event;
pub mod state;

// Re-exports
pub use debt::{Debt, DebtType};
pub use event::{Event, EventLog, PayoffEvent};
pub use state::{DebtPayment, PeriodResult, SimulationState};
