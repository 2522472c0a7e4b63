//! Tests for the Simulator stepping API, errors and event log

use chrono::NaiveDate;
use debt_payoff_core_rs::{
    simulate, Debt, InvalidInputError, PayoffStrategy, SimulationConfig, SimulationError,
    Simulator,
};
use rust_decimal_macros::dec;

fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Interest-free debts so every number below is exact
fn interest_free() -> Vec<Debt> {
    vec![
        Debt::new("Small", dec!(100), dec!(50), dec!(0)).with_id("small"),
        Debt::new("Large", dec!(1000), dec!(100), dec!(0)).with_id("large"),
    ]
}

#[test]
fn test_first_step_accrues_interest_then_pays() {
    let debts = vec![Debt::new("Card", dec!(1000), dec!(150), dec!(12)).with_id("card")];
    let mut sim =
        Simulator::new(SimulationConfig::new(debts, PayoffStrategy::Avalanche, dec!(0))).unwrap();

    let result = sim.step().unwrap();

    assert_eq!(result.period, 1);
    assert_eq!(result.payments[0].interest, dec!(10));
    assert_eq!(result.payments[0].payment, dec!(150));
    assert_eq!(result.payments[0].principal(), dec!(140));
    assert_eq!(sim.debt_balance("card"), Some(dec!(860)));
    assert_eq!(sim.current_period(), 1);
}

#[test]
fn test_pool_rolls_over_after_payoff() {
    let config = SimulationConfig::new(interest_free(), PayoffStrategy::Snowball, dec!(25));
    let mut sim = Simulator::new(config).unwrap();
    assert_eq!(sim.snowball_pool(), dec!(25));

    let p1 = sim.step().unwrap();
    assert_eq!(p1.target_debt_id.as_deref(), Some("small"));
    assert_eq!(p1.payments[0].payment, dec!(75));
    assert_eq!(sim.debt_balance("small"), Some(dec!(25)));

    // Payoff period: capped at the remaining 25, freed minimum joins the pool
    let p2 = sim.step().unwrap();
    assert_eq!(p2.payments[0].payment, dec!(25));
    assert_eq!(p2.payoffs.len(), 1);
    assert_eq!(p2.snowball_pool, dec!(25));
    assert_eq!(p2.snowball_pool_after, dec!(75));
    assert_eq!(p2.payments[1].payment, dec!(100));

    // Larger debt receives the grown pool from the next period on
    let p3 = sim.step().unwrap();
    assert_eq!(p3.target_debt_id.as_deref(), Some("large"));
    assert_eq!(p3.payments.len(), 1);
    assert_eq!(p3.payments[0].payment, dec!(175));
    assert_eq!(p3.payments[0].snowball_portion, dec!(75));

    let result = sim.finish(now()).unwrap();
    assert_eq!(result.total_periods, 7);
    assert_eq!(result.total_interest, dec!(0));
    assert_eq!(result.total_paid, dec!(1100));
    assert_eq!(result.final_snowball, dec!(175));
    assert_eq!(result.payoff_order(), vec!["small", "large"]);
}

#[test]
fn test_no_rollover_without_extra_payment() {
    let config = SimulationConfig::new(interest_free(), PayoffStrategy::Snowball, dec!(0));
    let mut sim = Simulator::new(config).unwrap();

    sim.run().unwrap();

    assert_eq!(sim.snowball_pool(), dec!(0));
    // Large pays 100 a period on its own
    assert_eq!(sim.current_period(), 10);
}

#[test]
fn test_run_completes_and_step_then_fails() {
    let config = SimulationConfig::new(interest_free(), PayoffStrategy::Avalanche, dec!(50));
    let mut sim = Simulator::new(config).unwrap();

    sim.run().unwrap();
    assert!(sim.is_complete());
    assert!(sim.state().is_complete());

    let period = sim.current_period();
    assert_eq!(
        sim.step().unwrap_err(),
        SimulationError::SimulationComplete { period }
    );
}

#[test]
fn test_invalid_input_fails_before_any_period() {
    let debts = vec![Debt::new("Payday", dec!(10000), dec!(10), dec!(24)).with_id("payday")];
    let err = simulate(&debts, PayoffStrategy::Avalanche, dec!(100), now()).unwrap_err();

    let non_amortizing = err.non_amortizing().expect("non-amortizing error");
    assert_eq!(non_amortizing.debt_id, "payday");
    assert_eq!(non_amortizing.first_period_interest, dec!(200));
}

#[test]
fn test_empty_debt_list() {
    assert_eq!(
        simulate(&[], PayoffStrategy::Snowball, dec!(0), now()).unwrap_err(),
        SimulationError::InvalidInput(InvalidInputError::EmptyDebtList)
    );
}

#[test]
fn test_non_convergent_at_default_cap() {
    // Amortizes, but only just: about 625 months at minimums
    let debts = vec![Debt::new("Slow", dec!(10000), dec!(100.2), dec!(12)).with_id("slow")];
    let err = simulate(&debts, PayoffStrategy::Avalanche, dec!(0), now()).unwrap_err();

    match err {
        SimulationError::NonConvergent(inner) => {
            assert_eq!(inner.max_periods, 600);
            assert_eq!(inner.partial.periods, 600);
            assert_eq!(inner.remaining_debts.len(), 1);
            assert_eq!(inner.remaining_debts[0].debt_id, "slow");
            assert!(inner.remaining_debts[0].balance > dec!(0));
        }
        other => panic!("expected NonConvergent, got {:?}", other),
    }
}

#[test]
fn test_non_convergent_with_custom_cap() {
    let config = SimulationConfig::new(interest_free(), PayoffStrategy::Avalanche, dec!(0))
        .with_max_periods(3);
    let mut sim = Simulator::new(config).unwrap();

    for _ in 0..3 {
        sim.step().unwrap();
    }
    let err = sim.step().unwrap_err();
    assert!(err.is_non_convergent());
    // Failed step does not advance the clock
    assert_eq!(sim.current_period(), 3);
}

#[test]
fn test_caller_debts_are_not_modified() {
    let debts = interest_free();
    let before = debts.clone();

    simulate(&debts, PayoffStrategy::Snowball, dec!(100), now()).unwrap();

    assert_eq!(debts, before);
}

#[test]
fn test_event_log_records_each_period() {
    let config = SimulationConfig::new(interest_free(), PayoffStrategy::Snowball, dec!(25));
    let mut sim = Simulator::new(config).unwrap();
    sim.run().unwrap();

    let log = sim.event_log();
    let paid_off: Vec<&str> = log
        .events_of_type("DebtPaidOff")
        .iter()
        .filter_map(|e| e.debt_id())
        .collect();
    assert_eq!(paid_off, vec!["small", "large"]);

    // Only the first payoff leaves a debt to roll into, but both are logged
    assert_eq!(log.events_of_type("SnowballIncreased").len(), 2);
    assert_eq!(log.events_at_period(2).len(), 4);
    assert_eq!(log.events_for_debt("small").len(), 4);

    let completed = log.events_of_type("SimulationCompleted");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].period(), 7);
}

#[test]
fn test_finish_reports_duration_and_date() {
    let debts = vec![Debt::new("Loan", dec!(1300), dec!(100), dec!(0)).with_id("loan")];
    let result = simulate(&debts, PayoffStrategy::Avalanche, dec!(0), now()).unwrap();

    assert_eq!(result.total_periods, 13);
    assert_eq!(result.duration.to_string(), "1 year, 1 month");
    assert_eq!(result.debt_free_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    assert_eq!(result.schedule.len(), 13);
    assert_eq!(result.total_principal(), dec!(1300));
}
