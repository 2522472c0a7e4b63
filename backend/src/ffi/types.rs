//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)
//!
//! Money crosses the boundary as Python `float` or `str` on the way in and
//! as `float` on the way out.

use chrono::NaiveDate;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::debt::{Debt, DebtType};
use crate::models::state::PeriodResult;
use crate::orchestrator::{
    SimulationConfig, SimulationError, SimulationResult, StrategyComparison, DEFAULT_MAX_PERIODS,
};
use crate::policy::PayoffStrategy;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// Missing keys and `None` values both yield `Ok(None)`.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Convert a Python `str`, `int` or `float` to `Decimal`
fn to_decimal(value: &Bound<'_, PyAny>, key: &str) -> PyResult<Decimal> {
    if let Ok(text) = value.extract::<String>() {
        return Decimal::from_str(text.trim())
            .map_err(|e| PyValueError::new_err(format!("Field '{}': {}", key, e)));
    }

    if let Ok(int) = value.extract::<i64>() {
        return Ok(Decimal::from(int));
    }

    let float: f64 = value.extract()?;
    Decimal::try_from(float)
        .map_err(|e| PyValueError::new_err(format!("Field '{}': {}", key, e)))
}

fn extract_decimal(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Decimal> {
    let value = dict
        .get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?;
    to_decimal(&value, key)
}

fn to_float(value: Decimal) -> PyResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| PyValueError::new_err(format!("{} is not representable as float", value)))
}

// ========================================================================
// Configuration Parsers
// ========================================================================

pub fn parse_strategy(name: &str) -> PyResult<PayoffStrategy> {
    PayoffStrategy::from_str(name).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn parse_debt_type(name: &str) -> PyResult<DebtType> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|_| PyValueError::new_err(format!("Unknown debt type '{}'", name)))
}

/// Convert a Python dict to a Debt
fn parse_debt(py_debt: &Bound<'_, PyDict>) -> PyResult<Debt> {
    let name: String = extract_required(py_debt, "name")?;
    let balance = extract_decimal(py_debt, "balance")?;
    let minimum_payment = extract_decimal(py_debt, "minimum_payment")?;
    let annual_interest_rate = extract_decimal(py_debt, "annual_interest_rate")?;

    let mut debt = Debt::new(name, balance, minimum_payment, annual_interest_rate);

    if let Some(id) = extract_optional::<String>(py_debt, "id")? {
        debt = debt.with_id(id);
    }
    if let Some(debt_type) = extract_optional::<String>(py_debt, "debt_type")? {
        debt = debt.with_type(parse_debt_type(&debt_type)?);
    }

    Ok(debt)
}

/// Convert a Python dict to SimulationConfig
///
/// ```python
/// {
///     "debts": [{"name": "Visa", "balance": 2500, "minimum_payment": 75,
///                "annual_interest_rate": 18.5, "debt_type": "credit_card"}],
///     "strategy": "avalanche",     # optional, default avalanche
///     "extra_monthly_payment": 200, # optional, default 0
///     "max_periods": 600,          # optional
/// }
/// ```
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let py_debts: Bound<'_, PyList> = extract_required(py_config, "debts")?;

    let mut debts = Vec::with_capacity(py_debts.len());
    for item in py_debts.iter() {
        let py_debt = item.downcast::<PyDict>()?;
        debts.push(parse_debt(py_debt)?);
    }

    let strategy = match extract_optional::<String>(py_config, "strategy")? {
        Some(name) => parse_strategy(&name)?,
        None => PayoffStrategy::Avalanche,
    };

    let extra = match py_config.get_item("extra_monthly_payment")? {
        Some(value) if !value.is_none() => to_decimal(&value, "extra_monthly_payment")?,
        _ => Decimal::ZERO,
    };

    let max_periods: usize =
        extract_optional(py_config, "max_periods")?.unwrap_or(DEFAULT_MAX_PERIODS);

    Ok(SimulationConfig::new(debts, strategy, extra).with_max_periods(max_periods))
}

pub fn parse_date(text: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("Invalid date '{}': {}", text, e)))
}

/// Map simulator errors to Python exceptions
///
/// Input problems become `ValueError`; everything else `RuntimeError`.
pub fn simulation_error_to_py(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidInput(_) => PyValueError::new_err(err.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

// ========================================================================
// Result Converters
// ========================================================================

pub fn period_result_to_py(py: Python<'_>, result: &PeriodResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("period", result.period)?;
    dict.set_item("total_interest", to_float(result.total_interest())?)?;
    dict.set_item("total_paid", to_float(result.total_paid())?)?;
    dict.set_item("snowball_pool", to_float(result.snowball_pool)?)?;
    dict.set_item("snowball_pool_after", to_float(result.snowball_pool_after)?)?;
    dict.set_item("target_debt_id", result.target_debt_id.as_deref())?;

    let payments = PyList::empty(py);
    for payment in &result.payments {
        let item = PyDict::new(py);
        item.set_item("debt_id", &payment.debt_id)?;
        item.set_item("interest", to_float(payment.interest)?)?;
        item.set_item("payment", to_float(payment.payment)?)?;
        item.set_item("snowball_portion", to_float(payment.snowball_portion)?)?;
        item.set_item("balance_after", to_float(payment.balance_after)?)?;
        payments.append(item)?;
    }
    dict.set_item("payments", payments)?;

    let payoffs: Vec<&str> = result.payoffs.iter().map(|p| p.debt_id.as_str()).collect();
    dict.set_item("payoffs", payoffs)?;

    Ok(dict.into())
}

pub fn simulation_result_to_py(py: Python<'_>, result: &SimulationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("strategy", result.strategy.as_str())?;
    dict.set_item("total_periods", result.total_periods)?;
    dict.set_item("years", result.duration.years)?;
    dict.set_item("months", result.duration.months)?;
    dict.set_item("debt_free_date", result.debt_free_date.format("%Y-%m-%d").to_string())?;
    dict.set_item("total_interest", to_float(result.total_interest)?)?;
    dict.set_item("total_paid", to_float(result.total_paid)?)?;
    dict.set_item("final_snowball", to_float(result.final_snowball)?)?;

    let payoff_events = PyList::empty(py);
    for event in &result.payoff_events {
        let item = PyDict::new(py);
        item.set_item("debt_id", &event.debt_id)?;
        item.set_item("period", event.period)?;
        item.set_item("payoff_amount", to_float(event.payoff_amount)?)?;
        payoff_events.append(item)?;
    }
    dict.set_item("payoff_events", payoff_events)?;

    let priority_order: Vec<&str> = result.priority_order.iter().map(Debt::id).collect();
    dict.set_item("priority_order", priority_order)?;

    let schedule = PyList::empty(py);
    for period in &result.schedule {
        schedule.append(period_result_to_py(py, period)?)?;
    }
    dict.set_item("schedule", schedule)?;

    Ok(dict.into())
}

pub fn comparison_to_py(py: Python<'_>, comparison: &StrategyComparison) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("avalanche", simulation_result_to_py(py, &comparison.avalanche)?)?;
    dict.set_item("snowball", simulation_result_to_py(py, &comparison.snowball)?)?;
    match &comparison.minimum_only {
        Some(baseline) => dict.set_item("minimum_only", simulation_result_to_py(py, baseline)?)?,
        None => dict.set_item("minimum_only", py.None())?,
    }
    dict.set_item("recommended", comparison.recommended.as_str())?;
    dict.set_item(
        "snowball_interest_premium",
        to_float(comparison.snowball_interest_premium())?,
    )?;

    Ok(dict.into())
}
