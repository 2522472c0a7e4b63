//! Scenario file loading
//!
//! A scenario is a JSON document describing the debts and budget:
//!
//! ```json
//! {
//!   "debts": [
//!     { "id": "visa", "name": "Visa", "balance": 5000, "minimum_payment": 150,
//!       "annual_interest_rate": 20, "debt_type": "credit_card" }
//!   ],
//!   "extra_monthly_payment": 200,
//!   "strategy": "avalanche",
//!   "start_date": "2025-01-01",
//!   "max_periods": 600
//! }
//! ```
//!
//! Everything but `debts` is optional; command-line flags override file values.

use chrono::NaiveDate;
use debt_payoff_core_rs::{Debt, DebtConfig, PayoffStrategy, SimulationConfig, DEFAULT_MAX_PERIODS};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::{CliError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFile {
    pub debts: Vec<DebtConfig>,

    #[serde(default)]
    pub extra_monthly_payment: Decimal,

    #[serde(default)]
    pub strategy: Option<PayoffStrategy>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub max_periods: Option<usize>,
}

/// Values given on the command line, each overriding the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strategy: Option<PayoffStrategy>,
    pub extra_monthly_payment: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub max_periods: Option<usize>,
}

/// A scenario with overrides applied
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub start_date: NaiveDate,
}

impl ScenarioFile {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply overrides; `today` is used when no start date is given anywhere
    pub fn resolve(self, overrides: &Overrides, today: NaiveDate) -> Scenario {
        let debts: Vec<Debt> = self.debts.into_iter().map(Debt::from).collect();
        let strategy = overrides
            .strategy
            .or(self.strategy)
            .unwrap_or(PayoffStrategy::Avalanche);
        let extra = overrides
            .extra_monthly_payment
            .unwrap_or(self.extra_monthly_payment);
        let max_periods = overrides
            .max_periods
            .or(self.max_periods)
            .unwrap_or(DEFAULT_MAX_PERIODS);

        Scenario {
            config: SimulationConfig::new(debts, strategy, extra).with_max_periods(max_periods),
            start_date: overrides.start_date.or(self.start_date).unwrap_or(today),
        }
    }
}
