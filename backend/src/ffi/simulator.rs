//! PyO3 wrapper for Simulator
//!
//! This module provides the Python interface to the Rust payoff engine.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{
    comparison_to_py, parse_date, parse_simulation_config, period_result_to_py,
    simulation_error_to_py, simulation_result_to_py,
};
use crate::orchestrator::{self, Simulator as RustSimulator};

/// Python wrapper for the Rust Simulator
///
/// # Example (from Python)
///
/// ```python
/// from debt_payoff_core_rs import DebtSimulator
///
/// config = {
///     "debts": [
///         {"id": "card", "name": "Card", "balance": 5000,
///          "minimum_payment": 150, "annual_interest_rate": 20},
///     ],
///     "strategy": "avalanche",
///     "extra_monthly_payment": 200,
/// }
///
/// sim = DebtSimulator(config)
/// period = sim.step()
/// print(f"Period {period['period']}: paid {period['total_paid']:.2f}")
/// result = sim.finish("2025-01-01")
/// ```
#[pyclass(name = "DebtSimulator")]
pub struct PySimulator {
    inner: RustSimulator,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from a configuration dict
    ///
    /// Raises ValueError on invalid input, including a minimum payment that
    /// does not cover interest.
    #[new]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_simulation_config(config)?;
        let inner = RustSimulator::new(rust_config).map_err(simulation_error_to_py)?;
        Ok(PySimulator { inner })
    }

    /// Execute one period and return what happened
    fn step(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = self.inner.step().map_err(simulation_error_to_py)?;
        period_result_to_py(py, &result)
    }

    /// Step until every debt is paid off
    fn run(&mut self) -> PyResult<()> {
        self.inner.run().map_err(simulation_error_to_py)
    }

    /// Run to completion and return the full result
    ///
    /// `now` is the start date as `YYYY-MM-DD`. The simulator itself is left
    /// untouched, so this can be called more than once.
    fn finish(&self, py: Python<'_>, now: &str) -> PyResult<Py<PyDict>> {
        let now = parse_date(now)?;
        let result = self
            .inner
            .clone()
            .finish(now)
            .map_err(simulation_error_to_py)?;
        simulation_result_to_py(py, &result)
    }

    fn current_period(&self) -> usize {
        self.inner.current_period()
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    fn snowball_pool(&self) -> String {
        self.inner.snowball_pool().to_string()
    }

    /// Working balance of a debt as a decimal string, or None if unknown
    fn debt_balance(&self, debt_id: &str) -> Option<String> {
        self.inner.debt_balance(debt_id).map(|b| b.to_string())
    }

    /// Serialize the current state to a JSON string
    fn save_state(&self) -> PyResult<String> {
        self.inner.save_state().map_err(simulation_error_to_py)
    }

    /// Restore a simulator from `save_state` output and the original config
    #[staticmethod]
    fn load_state(config: &Bound<'_, PyDict>, state_json: &str) -> PyResult<Self> {
        let rust_config = parse_simulation_config(config)?;
        let inner =
            RustSimulator::load_state(rust_config, state_json).map_err(simulation_error_to_py)?;
        Ok(PySimulator { inner })
    }
}

/// Run a complete simulation from a configuration dict
#[pyfunction]
pub fn simulate(py: Python<'_>, config: &Bound<'_, PyDict>, now: &str) -> PyResult<Py<PyDict>> {
    let rust_config = parse_simulation_config(config)?;
    let now = parse_date(now)?;

    let result = RustSimulator::new(rust_config)
        .and_then(|sim| sim.finish(now))
        .map_err(simulation_error_to_py)?;

    simulation_result_to_py(py, &result)
}

/// Compare avalanche, snowball and minimum-only runs
///
/// The config's `strategy` key is ignored.
#[pyfunction]
pub fn compare_strategies(
    py: Python<'_>,
    config: &Bound<'_, PyDict>,
    now: &str,
) -> PyResult<Py<PyDict>> {
    let rust_config = parse_simulation_config(config)?;
    let now = parse_date(now)?;

    let comparison = orchestrator::compare_strategies(
        &rust_config.debts,
        rust_config.extra_monthly_payment,
        now,
    )
    .map_err(simulation_error_to_py)?;

    comparison_to_py(py, &comparison)
}
