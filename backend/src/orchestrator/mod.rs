//! Orchestrator - main simulation loop
//!
//! Drives a payoff simulation from validated input to reported result.
//!
//! See `engine.rs` for the period loop and `aggregator.rs` for result assembly.

pub mod aggregator;
pub mod checkpoint;
pub mod comparison;
pub mod engine;

// Re-export main types for convenience
pub use aggregator::{round_currency, PartialTrace, ResultAggregator, SimulationResult};
pub use comparison::{compare_strategies, StrategyComparison};
pub use engine::{
    simulate, DebtConfig, NonConvergentError, RemainingDebt, SimulationConfig, SimulationError,
    Simulator, DEFAULT_MAX_PERIODS,
};

// Re-export checkpoint types
pub use checkpoint::{DebtSnapshot, StateSnapshot};
