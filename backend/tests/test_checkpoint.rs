//! Tests for checkpoint save/load
//!
//! A checkpointed run must finish exactly like an uninterrupted one, and a
//! checkpoint must refuse to load against a different config or with
//! corrupted contents.

use chrono::NaiveDate;
use debt_payoff_core_rs::{Debt, PayoffStrategy, SimulationConfig, SimulationError, Simulator};
use rust_decimal_macros::dec;
use serde_json::Value;

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn config() -> SimulationConfig {
    SimulationConfig::new(
        vec![
            Debt::new("Debt A", dec!(5000), dec!(150), dec!(20)).with_id("a"),
            Debt::new("Debt B", dec!(1000), dec!(50), dec!(5)).with_id("b"),
        ],
        PayoffStrategy::Snowball,
        dec!(200),
    )
}

fn checkpoint_after(periods: usize) -> String {
    let mut sim = Simulator::new(config()).unwrap();
    for _ in 0..periods {
        sim.step().unwrap();
    }
    sim.save_state().unwrap()
}

#[test]
fn test_resume_matches_uninterrupted_run() {
    let expected = Simulator::new(config()).unwrap().finish(now()).unwrap();

    // Before, at, and after B's payoff in period 5
    for periods in [0, 3, 5, 8] {
        let json = checkpoint_after(periods);
        let restored = Simulator::load_state(config(), &json).unwrap();
        assert_eq!(restored.current_period(), periods);

        let result = restored.finish(now()).unwrap();
        assert_eq!(result, expected, "resume after {} periods diverged", periods);
    }
}

#[test]
fn test_restored_state_matches_saved_state() {
    let mut sim = Simulator::new(config()).unwrap();
    for _ in 0..6 {
        sim.step().unwrap();
    }

    let restored = Simulator::load_state(config(), &sim.save_state().unwrap()).unwrap();

    assert_eq!(restored.state(), sim.state());
    assert_eq!(restored.aggregator(), sim.aggregator());
    assert_eq!(restored.snowball_pool(), dec!(250));
    assert_eq!(restored.debt_balance("b"), Some(dec!(0)));
    assert_eq!(restored.config_hash(), sim.config_hash());
    assert!(restored.event_log().is_empty());
}

#[test]
fn test_config_hash_is_deterministic() {
    let first = Simulator::new(config()).unwrap();
    let second = Simulator::new(config()).unwrap();
    assert_eq!(first.config_hash(), second.config_hash());

    let other = Simulator::new(config().with_strategy(PayoffStrategy::Avalanche)).unwrap();
    assert_ne!(first.config_hash(), other.config_hash());
}

#[test]
fn test_load_rejects_different_config() {
    let json = checkpoint_after(3);

    let mut changed = config();
    changed.extra_monthly_payment = dec!(250);

    let err = Simulator::load_state(changed, &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_malformed_json() {
    let err = Simulator::load_state(config(), "{ not json").unwrap_err();
    assert!(matches!(err, SimulationError::SerializationError(_)));
}

fn tampered(periods: usize, edit: impl FnOnce(&mut Value)) -> String {
    let mut value: Value = serde_json::from_str(&checkpoint_after(periods)).unwrap();
    edit(&mut value);
    value.to_string()
}

#[test]
fn test_load_rejects_balance_above_original() {
    let json = tampered(3, |v| v["debts"][1]["balance"] = Value::from("99999"));

    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_reordered_debts() {
    let json = tampered(3, |v| {
        if let Some(debts) = v["debts"].as_array_mut() {
            debts.reverse();
        }
    });

    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_zero_balance_without_payoff() {
    // Snowball ranks B first; zero it out without a payoff event
    let json = tampered(3, |v| v["debts"][0]["balance"] = Value::from("0"));

    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_period_mismatch() {
    let json = tampered(3, |v| v["current_period"] = Value::from(7));

    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_changed_debt_terms() {
    let edits: [(&str, Value); 4] = [
        ("annual_interest_rate", Value::from("0")),
        ("minimum_payment", Value::from("1")),
        ("original_balance", Value::from("6000")),
        ("name", Value::from("Renamed")),
    ];

    for (field, value) in edits {
        let json = tampered(1, |v| v["debts"][1][field] = value);

        let err = Simulator::load_state(config(), &json).unwrap_err();
        assert!(
            matches!(err, SimulationError::StateValidationError(_)),
            "changed {} was accepted",
            field
        );
    }
}

#[test]
fn test_load_rejects_flipped_rollover() {
    let json = tampered(1, |v| v["rollover_enabled"] = Value::from(false));

    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_rejects_inflated_pool() {
    // Before any payoff the pool is exactly the extra payment
    let json = tampered(2, |v| v["snowball_pool"] = Value::from("900"));
    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));

    // After B's payoff it must include B's freed minimum
    let json = tampered(6, |v| v["snowball_pool"] = Value::from("200"));
    let err = Simulator::load_state(config(), &json).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}

#[test]
fn test_load_without_extra_payment_keeps_pool_empty() {
    let config = SimulationConfig::new(
        vec![Debt::new("Card", dec!(1000), dec!(100), dec!(12)).with_id("card")],
        PayoffStrategy::Avalanche,
        dec!(0),
    );
    let mut sim = Simulator::new(config.clone()).unwrap();
    sim.step().unwrap();
    let json = sim.save_state().unwrap();

    let restored = Simulator::load_state(config.clone(), &json).unwrap();
    assert_eq!(restored.snowball_pool(), dec!(0));

    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["debts"][0]["annual_interest_rate"] = Value::from("0");
    value["debts"][0]["minimum_payment"] = Value::from("1");
    let err = Simulator::load_state(config, &value.to_string()).unwrap_err();
    assert!(matches!(err, SimulationError::StateValidationError(_)));
}
