//! Payoff Priority Policy Module
//!
//! This module decides which debt receives the snowball pool first.
//!
//! # Overview
//!
//! A payoff strategy ranks the debt set once, before the first period. The
//! simulator then commits to that ranking: each period the pool goes to the
//! first debt in the ranking that still has a balance. Debts are never
//! re-ranked mid-run.
//!
//! Available strategies:
//! 1. **Avalanche**: highest annual interest rate first
//! 2. **Snowball**: smallest original balance first
//!
//! Ties keep the caller's input order, so rankings are reproducible.
//!
//! # Policy Interface
//!
//! Strategies implement the [`PriorityPolicy`] trait:
//! ```rust
//! use debt_payoff_core_rs::policy::PriorityPolicy;
//! use debt_payoff_core_rs::Debt;
//! use std::cmp::Ordering;
//!
//! /// Largest minimum payment first
//! struct BiggestBill;
//!
//! impl PriorityPolicy for BiggestBill {
//!     fn name(&self) -> &'static str {
//!         "biggest_bill"
//!     }
//!
//!     fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
//!         b.minimum_payment().cmp(&a.minimum_payment())
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

use crate::models::debt::Debt;
use crate::validation::ValidDebtSet;

pub mod avalanche;
pub mod snowball;

pub use avalanche::AvalanchePolicy;
pub use snowball::SnowballPolicy;

/// Ranking rule for the snowball pool
pub trait PriorityPolicy {
    /// Strategy name used in logs and output
    fn name(&self) -> &'static str;

    /// `Ordering::Less` means `a` is paid down before `b`
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering;

    /// Rank a validated debt set
    ///
    /// Stable: debts comparing equal keep their input order. The input is
    /// left untouched.
    fn order(&self, debts: &ValidDebtSet) -> Vec<Debt> {
        let mut ranked = debts.debts().to_vec();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }
}

/// Named payoff strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl PayoffStrategy {
    pub const ALL: [PayoffStrategy; 2] = [PayoffStrategy::Avalanche, PayoffStrategy::Snowball];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }

    /// The policy implementing this strategy
    pub fn policy(&self) -> &'static dyn PriorityPolicy {
        match self {
            PayoffStrategy::Avalanche => &AvalanchePolicy,
            PayoffStrategy::Snowball => &SnowballPolicy,
        }
    }
}

impl std::fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown payoff strategy '{0}' (expected 'avalanche' or 'snowball')")]
pub struct ParseStrategyError(pub String);

impl FromStr for PayoffStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(PayoffStrategy::Avalanche),
            "snowball" => Ok(PayoffStrategy::Snowball),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Rank debts under a named strategy
///
/// Pure: returns a new vector in priority order.
pub fn order(debts: &ValidDebtSet, strategy: PayoffStrategy) -> Vec<Debt> {
    strategy.policy().order(debts)
}
