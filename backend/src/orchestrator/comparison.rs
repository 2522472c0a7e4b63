//! Strategy comparison
//!
//! Runs the same debts and budget under every strategy, plus a
//! minimum-payments-only baseline, and reports the difference.
//!
//! Each run is an independent [`Simulator`]; nothing is shared between them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::debt::Debt;
use crate::orchestrator::aggregator::SimulationResult;
use crate::orchestrator::engine::{SimulationConfig, SimulationError, Simulator};
use crate::policy::PayoffStrategy;

/// Side-by-side results for one set of debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: SimulationResult,
    pub snowball: SimulationResult,

    /// Minimum payments only, no extra and no rollover.
    /// `None` when that baseline exceeds the period cap.
    pub minimum_only: Option<SimulationResult>,

    /// Lowest interest, then fewest periods; avalanche on a full tie
    pub recommended: PayoffStrategy,
}

impl StrategyComparison {
    pub fn result(&self, strategy: PayoffStrategy) -> &SimulationResult {
        match strategy {
            PayoffStrategy::Avalanche => &self.avalanche,
            PayoffStrategy::Snowball => &self.snowball,
        }
    }

    /// Extra interest snowball costs over avalanche (negative if it saves)
    pub fn snowball_interest_premium(&self) -> Decimal {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// Interest saved by a strategy compared with paying minimums only
    pub fn interest_saved(&self, strategy: PayoffStrategy) -> Option<Decimal> {
        self.minimum_only
            .as_ref()
            .map(|baseline| baseline.total_interest - self.result(strategy).total_interest)
    }

    /// Months saved by a strategy compared with paying minimums only
    pub fn months_saved(&self, strategy: PayoffStrategy) -> Option<i64> {
        self.minimum_only.as_ref().map(|baseline| {
            baseline.total_periods as i64 - self.result(strategy).total_periods as i64
        })
    }
}

/// Compare avalanche, snowball and the minimum-payments-only baseline
///
/// # Errors
///
/// Input errors, or non-convergence of either strategy run. A baseline that
/// does not converge is reported as `minimum_only: None` instead.
pub fn compare_strategies(
    debts: &[Debt],
    extra_monthly_payment: Decimal,
    now: NaiveDate,
) -> Result<StrategyComparison, SimulationError> {
    let config = SimulationConfig::new(
        debts.to_vec(),
        PayoffStrategy::Avalanche,
        extra_monthly_payment,
    );

    let avalanche = Simulator::new(config.clone())?.finish(now)?;
    let snowball =
        Simulator::new(config.clone().with_strategy(PayoffStrategy::Snowball))?.finish(now)?;

    let baseline_config = SimulationConfig {
        extra_monthly_payment: Decimal::ZERO,
        ..config
    };
    let minimum_only = match Simulator::new(baseline_config)?.finish(now) {
        Ok(result) => Some(result),
        Err(err) if err.is_non_convergent() => {
            tracing::warn!("Minimum-payments-only baseline exceeds the period cap");
            None
        }
        Err(err) => return Err(err),
    };

    let recommended = recommend(&avalanche, &snowball);

    tracing::info!(
        %recommended,
        avalanche_interest = %avalanche.total_interest,
        snowball_interest = %snowball.total_interest,
        "Strategy comparison complete"
    );

    Ok(StrategyComparison {
        avalanche,
        snowball,
        minimum_only,
        recommended,
    })
}

fn recommend(avalanche: &SimulationResult, snowball: &SimulationResult) -> PayoffStrategy {
    let key = |r: &SimulationResult| (r.total_interest, r.total_periods);
    if key(snowball) < key(avalanche) {
        PayoffStrategy::Snowball
    } else {
        PayoffStrategy::Avalanche
    }
}
