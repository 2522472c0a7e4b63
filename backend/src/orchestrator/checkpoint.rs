//! Checkpoint - Save/Load Simulation State
//!
//! Enables serialization and deserialization of a running simulation for
//! pause/resume.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored run finishes with the same result as an uninterrupted one
//! - **Ranking Integrity**: debts appear in the order the config's strategy produces
//! - **Balance Bounds**: every balance lies in `[0, original_balance]`
//! - **Payoff Integrity**: exactly the paid-off debts have exactly one payoff event
//! - **Config Matching**: state can only be loaded with matching config, and
//!   its debt terms, rollover flag and pool must agree with that config

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::models::debt::{Debt, DebtType};
use crate::models::state::SimulationState;
use crate::orchestrator::aggregator::ResultAggregator;
use crate::orchestrator::engine::SimulationError;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete simulator state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Periods completed
    pub current_period: usize,

    pub snowball_pool: Decimal,

    pub rollover_enabled: bool,

    /// Working debts in priority order
    pub debts: Vec<DebtSnapshot>,

    /// Totals, payoff events and schedule so far
    pub aggregator: ResultAggregator,

    /// SHA256 hash of original config (for validation)
    pub config_hash: String,
}

impl StateSnapshot {
    pub fn capture(
        state: &SimulationState,
        aggregator: &ResultAggregator,
        config_hash: String,
    ) -> Self {
        Self {
            current_period: state.period(),
            snowball_pool: state.snowball_pool(),
            rollover_enabled: state.rollover_enabled(),
            debts: state.debts().iter().map(DebtSnapshot::from).collect(),
            aggregator: aggregator.clone(),
            config_hash,
        }
    }

    pub fn restore(self) -> (SimulationState, ResultAggregator) {
        let debts = self.debts.into_iter().map(Debt::from).collect();
        let state = SimulationState::from_parts(
            self.current_period,
            debts,
            self.snowball_pool,
            self.rollover_enabled,
        );
        (state, self.aggregator)
    }
}

/// Debt state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtSnapshot {
    pub id: String,
    pub name: String,
    pub original_balance: Decimal,
    pub balance: Decimal,
    pub minimum_payment: Decimal,
    pub annual_interest_rate: Decimal,
    pub debt_type: DebtType,
}

impl From<&Debt> for DebtSnapshot {
    fn from(debt: &Debt) -> Self {
        DebtSnapshot {
            id: debt.id().to_string(),
            name: debt.name().to_string(),
            original_balance: debt.original_balance(),
            balance: debt.balance(),
            minimum_payment: debt.minimum_payment(),
            annual_interest_rate: debt.annual_interest_rate(),
            debt_type: debt.debt_type(),
        }
    }
}

impl From<DebtSnapshot> for Debt {
    fn from(snapshot: DebtSnapshot) -> Self {
        Debt::from_snapshot(
            snapshot.id,
            snapshot.name,
            snapshot.original_balance,
            snapshot.balance,
            snapshot.minimum_payment,
            snapshot.annual_interest_rate,
            snapshot.debt_type,
        )
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Keys are sorted before hashing so the hash does not depend on map
/// iteration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let digest = Sha256::digest(json.as_bytes());
    Ok(format!("{:x}", digest))
}

// ============================================================================
// Validation Functions
// ============================================================================

fn invalid(msg: String) -> SimulationError {
    SimulationError::StateValidationError(msg)
}

/// Validate state snapshot integrity
///
/// `expected` is the priority order the config produces, with starting
/// balances. `extra_monthly_payment` is the config's extra budget.
pub fn validate_snapshot(
    snapshot: &StateSnapshot,
    expected: &[Debt],
    extra_monthly_payment: Decimal,
) -> Result<(), SimulationError> {
    // 1. Ranking integrity
    let ids: Vec<&str> = snapshot.debts.iter().map(|d| d.id.as_str()).collect();
    let expected_ids: Vec<&str> = expected.iter().map(Debt::id).collect();
    if ids != expected_ids {
        return Err(invalid(format!(
            "Debt order {:?} does not match ranking {:?}",
            ids, expected_ids
        )));
    }

    // 2. Debt terms are fixed by the config
    for (debt, config) in snapshot.debts.iter().zip(expected) {
        let matches = debt.name == config.name()
            && debt.original_balance == config.original_balance()
            && debt.minimum_payment == config.minimum_payment()
            && debt.annual_interest_rate == config.annual_interest_rate()
            && debt.debt_type == config.debt_type();
        if !matches {
            return Err(invalid(format!(
                "Terms of debt {} do not match the config",
                debt.id
            )));
        }
    }

    // 3. Period bookkeeping
    if snapshot.aggregator.periods() != snapshot.current_period {
        return Err(invalid(format!(
            "Aggregator covers {} periods but snapshot is at period {}",
            snapshot.aggregator.periods(),
            snapshot.current_period
        )));
    }

    // 4. Payoff events: at most one per debt, none in the future
    let mut payoffs: HashMap<&str, usize> = HashMap::new();
    for event in snapshot.aggregator.payoff_events() {
        if event.period > snapshot.current_period {
            return Err(invalid(format!(
                "Payoff of {} at period {} is after snapshot period {}",
                event.debt_id, event.period, snapshot.current_period
            )));
        }
        if payoffs.insert(event.debt_id.as_str(), event.period).is_some() {
            return Err(invalid(format!(
                "Duplicate payoff event for debt {}",
                event.debt_id
            )));
        }
    }

    // 5. Balance bounds, and payoff events exactly for zero balances
    for debt in &snapshot.debts {
        if debt.balance < Decimal::ZERO || debt.balance > debt.original_balance {
            return Err(invalid(format!(
                "Balance {} for debt {} outside [0, {}]",
                debt.balance, debt.id, debt.original_balance
            )));
        }

        let paid_off = debt.balance.is_zero();
        let has_event = payoffs.contains_key(debt.id.as_str());
        if paid_off != has_event {
            return Err(invalid(format!(
                "Debt {} has balance {} but {} payoff event",
                debt.id,
                debt.balance,
                if has_event { "a" } else { "no" }
            )));
        }
    }

    if let Some(unknown) = payoffs.keys().find(|id| !ids.contains(*id)) {
        return Err(invalid(format!("Payoff event for unknown debt {}", unknown)));
    }

    // 6. Pool is the extra payment plus every freed minimum
    let rollover = extra_monthly_payment > Decimal::ZERO;
    if snapshot.rollover_enabled != rollover {
        return Err(invalid(format!(
            "Rollover is {} but the extra payment is {}",
            if snapshot.rollover_enabled { "on" } else { "off" },
            extra_monthly_payment
        )));
    }

    let freed: Decimal = if rollover {
        snapshot
            .debts
            .iter()
            .filter(|d| d.balance.is_zero())
            .map(|d| d.minimum_payment)
            .sum()
    } else {
        Decimal::ZERO
    };
    let expected_pool = extra_monthly_payment + freed;
    if snapshot.snowball_pool != expected_pool {
        return Err(invalid(format!(
            "Snowball pool {} does not match expected {}",
            snapshot.snowball_pool, expected_pool
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_config_hash_deterministic() {
        #[derive(Serialize)]
        struct Budget {
            extra: u32,
            label: String,
        }

        let first = Budget {
            extra: 200,
            label: "plan".to_string(),
        };
        let second = Budget {
            extra: 200,
            label: "plan".to_string(),
        };

        assert_eq!(
            compute_config_hash(&first).unwrap(),
            compute_config_hash(&second).unwrap()
        );
    }

    #[test]
    fn test_compute_config_hash_sensitive_to_values() {
        #[derive(Serialize)]
        struct Budget {
            extra: u32,
        }

        assert_ne!(
            compute_config_hash(&Budget { extra: 200 }).unwrap(),
            compute_config_hash(&Budget { extra: 201 }).unwrap()
        );
    }
}
