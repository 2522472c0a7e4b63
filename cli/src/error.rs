//! CLI error types

use debt_payoff_core_rs::{InvalidInputError, SimulationError};
use thiserror::Error;

/// Errors surfaced to the command line
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl CliError {
    /// Message suitable for an end user
    pub fn user_message(&self) -> String {
        match self {
            CliError::Simulation(SimulationError::InvalidInput(InvalidInputError::NonAmortizing(
                err,
            ))) => format!(
                "Debt '{}': minimum payment too low to cover interest (pays {}, interest is {:.2} per month)",
                err.debt_name, err.minimum_payment, err.first_period_interest
            ),
            CliError::Simulation(SimulationError::NonConvergent(err)) => format!(
                "These inputs produce an excessively long payoff horizon (over {} months)",
                err.max_periods
            ),
            other => other.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
