//! Tests for strategy comparison

use chrono::NaiveDate;
use debt_payoff_core_rs::{compare_strategies, simulate, Debt, PayoffStrategy, SimulationError};
use rust_decimal_macros::dec;

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn debts() -> Vec<Debt> {
    vec![
        Debt::new("Debt A", dec!(5000), dec!(150), dec!(20)).with_id("a"),
        Debt::new("Debt B", dec!(1000), dec!(50), dec!(5)).with_id("b"),
    ]
}

#[test]
fn test_comparison_matches_individual_runs() {
    let comparison = compare_strategies(&debts(), dec!(200), now()).unwrap();

    let avalanche = simulate(&debts(), PayoffStrategy::Avalanche, dec!(200), now()).unwrap();
    let snowball = simulate(&debts(), PayoffStrategy::Snowball, dec!(200), now()).unwrap();

    assert_eq!(comparison.avalanche, avalanche);
    assert_eq!(comparison.snowball, snowball);
    assert_eq!(comparison.result(PayoffStrategy::Snowball), &snowball);
}

#[test]
fn test_avalanche_recommended_when_cheaper() {
    let comparison = compare_strategies(&debts(), dec!(200), now()).unwrap();

    assert!(comparison.snowball_interest_premium() > dec!(0));
    assert_eq!(comparison.recommended, PayoffStrategy::Avalanche);
}

#[test]
fn test_minimum_only_baseline() {
    let comparison = compare_strategies(&debts(), dec!(200), now()).unwrap();
    let baseline = comparison.minimum_only.as_ref().expect("baseline converges");

    assert_eq!(baseline.extra_monthly_payment, dec!(0));
    assert_eq!(baseline.final_snowball, dec!(0));
    assert!(baseline.total_periods > comparison.avalanche.total_periods);

    for strategy in PayoffStrategy::ALL {
        assert!(comparison.interest_saved(strategy).unwrap() > dec!(0));
        assert!(comparison.months_saved(strategy).unwrap() > 0);
    }
}

#[test]
fn test_single_debt_strategies_tie() {
    let debts = vec![Debt::new("Visa", dec!(2500), dec!(75), dec!(18.5)).with_id("visa")];
    let comparison = compare_strategies(&debts, dec!(100), now()).unwrap();

    assert_eq!(comparison.snowball_interest_premium(), dec!(0));
    assert_eq!(
        comparison.avalanche.total_periods,
        comparison.snowball.total_periods
    );
    assert_eq!(comparison.recommended, PayoffStrategy::Avalanche);
}

#[test]
fn test_non_convergent_baseline_is_omitted() {
    // Minimums alone need about 625 months; the extra payment fixes that
    let debts = vec![Debt::new("Slow", dec!(10000), dec!(100.2), dec!(12)).with_id("slow")];
    let comparison = compare_strategies(&debts, dec!(400), now()).unwrap();

    assert!(comparison.minimum_only.is_none());
    assert_eq!(comparison.interest_saved(PayoffStrategy::Avalanche), None);
    assert_eq!(comparison.months_saved(PayoffStrategy::Snowball), None);
}

#[test]
fn test_invalid_input_propagates() {
    let err = compare_strategies(&[], dec!(100), now()).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidInput(_)));
}
