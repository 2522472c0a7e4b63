//! Input validation
//!
//! Turns caller-supplied debts into a [`ValidDebtSet`] before any simulation
//! runs. Every check here is a precondition of the simulator: a debt whose
//! minimum payment cannot cover its first period of interest would never be
//! paid off, so it is rejected up front instead of being discovered by the
//! period cap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::debt::Debt;

/// Largest accepted balance, minimum payment or extra payment
///
/// Keeps every per-period product and run total far inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Largest accepted annual percentage rate
pub const MAX_ANNUAL_RATE: Decimal = dec!(10000);

/// A debt whose minimum payment does not exceed its first-period interest
#[derive(Debug, Clone, Error, PartialEq)]
#[error(
    "Minimum payment {minimum_payment} for debt '{debt_id}' does not cover first-period interest {first_period_interest}"
)]
pub struct NonAmortizingDebtError {
    pub debt_id: String,
    pub debt_name: String,
    pub minimum_payment: Decimal,
    pub first_period_interest: Decimal,
}

/// Malformed simulation input
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidInputError {
    #[error("Debt list is empty")]
    EmptyDebtList,

    #[error("Balance {balance} for debt '{debt_id}' must be positive")]
    NonPositiveBalance { debt_id: String, balance: Decimal },

    #[error("Minimum payment {minimum_payment} for debt '{debt_id}' must be positive")]
    NonPositiveMinimumPayment {
        debt_id: String,
        minimum_payment: Decimal,
    },

    #[error("Interest rate {annual_interest_rate} for debt '{debt_id}' must not be negative")]
    NegativeInterestRate {
        debt_id: String,
        annual_interest_rate: Decimal,
    },

    #[error("{field} {value} for debt '{debt_id}' exceeds the limit of {}", MAX_AMOUNT)]
    AmountTooLarge {
        debt_id: String,
        field: &'static str,
        value: Decimal,
    },

    #[error(
        "Interest rate {annual_interest_rate} for debt '{debt_id}' exceeds {}%",
        MAX_ANNUAL_RATE
    )]
    InterestRateTooHigh {
        debt_id: String,
        annual_interest_rate: Decimal,
    },

    #[error(
        "Balance {balance} for debt '{debt_id}' differs from original balance {original_balance}"
    )]
    BalanceMismatch {
        debt_id: String,
        balance: Decimal,
        original_balance: Decimal,
    },

    #[error("Duplicate debt id '{debt_id}'")]
    DuplicateDebtId { debt_id: String },

    #[error("Extra monthly payment {amount} must not be negative")]
    NegativeExtraPayment { amount: Decimal },

    #[error("Extra monthly payment {amount} exceeds the limit of {}", MAX_AMOUNT)]
    ExtraPaymentTooLarge { amount: Decimal },

    #[error("Period cap must be positive")]
    ZeroMaxPeriods,

    #[error(transparent)]
    NonAmortizing(#[from] NonAmortizingDebtError),
}

impl InvalidInputError {
    /// Id of the debt the error refers to, if any
    pub fn debt_id(&self) -> Option<&str> {
        match self {
            InvalidInputError::NonPositiveBalance { debt_id, .. }
            | InvalidInputError::NonPositiveMinimumPayment { debt_id, .. }
            | InvalidInputError::NegativeInterestRate { debt_id, .. }
            | InvalidInputError::AmountTooLarge { debt_id, .. }
            | InvalidInputError::InterestRateTooHigh { debt_id, .. }
            | InvalidInputError::BalanceMismatch { debt_id, .. }
            | InvalidInputError::DuplicateDebtId { debt_id } => Some(debt_id),
            InvalidInputError::NonAmortizing(err) => Some(&err.debt_id),
            InvalidInputError::EmptyDebtList
            | InvalidInputError::NegativeExtraPayment { .. }
            | InvalidInputError::ExtraPaymentTooLarge { .. }
            | InvalidInputError::ZeroMaxPeriods => None,
        }
    }
}

/// A non-empty, checked, owned copy of the caller's debts
///
/// Only [`validate`] constructs one, so holding a `ValidDebtSet` proves every
/// precondition held at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidDebtSet {
    debts: Vec<Debt>,
}

impl ValidDebtSet {
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    /// Always false; kept alongside `len` for API symmetry
    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Debt> {
        self.debts.iter()
    }

    pub fn into_inner(self) -> Vec<Debt> {
        self.debts
    }
}

impl<'a> IntoIterator for &'a ValidDebtSet {
    type Item = &'a Debt;
    type IntoIter = std::slice::Iter<'a, Debt>;

    fn into_iter(self) -> Self::IntoIter {
        self.debts.iter()
    }
}

/// Per-debt checks shared by [`validate`] and [`Debt::try_new`]
pub(crate) fn check_debt(debt: &Debt) -> Result<(), InvalidInputError> {
    if debt.balance() <= Decimal::ZERO {
        return Err(InvalidInputError::NonPositiveBalance {
            debt_id: debt.id().to_string(),
            balance: debt.balance(),
        });
    }

    if debt.minimum_payment() <= Decimal::ZERO {
        return Err(InvalidInputError::NonPositiveMinimumPayment {
            debt_id: debt.id().to_string(),
            minimum_payment: debt.minimum_payment(),
        });
    }

    if debt.annual_interest_rate() < Decimal::ZERO {
        return Err(InvalidInputError::NegativeInterestRate {
            debt_id: debt.id().to_string(),
            annual_interest_rate: debt.annual_interest_rate(),
        });
    }

    // Bounds keep interest and run totals clear of Decimal overflow
    for (field, value) in [
        ("balance", debt.balance()),
        ("minimum_payment", debt.minimum_payment()),
    ] {
        if value > MAX_AMOUNT {
            return Err(InvalidInputError::AmountTooLarge {
                debt_id: debt.id().to_string(),
                field,
                value,
            });
        }
    }

    if debt.annual_interest_rate() > MAX_ANNUAL_RATE {
        return Err(InvalidInputError::InterestRateTooHigh {
            debt_id: debt.id().to_string(),
            annual_interest_rate: debt.annual_interest_rate(),
        });
    }

    // Fresh input has not been paid down yet
    if debt.balance() != debt.original_balance() {
        return Err(InvalidInputError::BalanceMismatch {
            debt_id: debt.id().to_string(),
            balance: debt.balance(),
            original_balance: debt.original_balance(),
        });
    }

    if !debt.is_amortizing() {
        return Err(NonAmortizingDebtError {
            debt_id: debt.id().to_string(),
            debt_name: debt.name().to_string(),
            minimum_payment: debt.minimum_payment(),
            first_period_interest: debt.period_interest(),
        }
        .into());
    }

    Ok(())
}

/// Validate a candidate debt list
///
/// Checks, in order: the list is non-empty; each debt has a positive balance,
/// a positive minimum payment, a non-negative rate, and a minimum payment
/// larger than its first period's interest; ids are unique. The first failure
/// is returned.
///
/// # Errors
/// [`InvalidInputError`], with [`InvalidInputError::NonAmortizing`] for a
/// minimum payment that cannot keep up with interest.
pub fn validate(debts: &[Debt]) -> Result<ValidDebtSet, InvalidInputError> {
    if debts.is_empty() {
        return Err(InvalidInputError::EmptyDebtList);
    }

    let mut seen = HashSet::with_capacity(debts.len());
    for debt in debts {
        check_debt(debt)?;

        if !seen.insert(debt.id()) {
            return Err(InvalidInputError::DuplicateDebtId {
                debt_id: debt.id().to_string(),
            });
        }
    }

    Ok(ValidDebtSet {
        debts: debts.to_vec(),
    })
}
