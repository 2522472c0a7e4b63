//! Debt model
//!
//! Represents one outstanding obligation.
//! Each debt has:
//! - A stable identifier (UUID unless the caller supplies one)
//! - Original and working balance
//! - Constant minimum payment and annual interest rate
//! - A cosmetic category tag
//!
//! CRITICAL: All money values are `Decimal`. Nothing is rounded until reporting.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::validation::{check_debt, InvalidInputError};

/// A balance at or below this amount is treated as paid off
pub const PAYOFF_EPSILON: Decimal = dec!(0.01);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Debt category
///
/// Display only. The simulator never branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    Auto,
    Student,
    Mortgage,
    Medical,
    #[default]
    Other,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CreditCard => "credit_card",
            DebtType::Auto => "auto",
            DebtType::Student => "student",
            DebtType::Mortgage => "mortgage",
            DebtType::Medical => "medical",
            DebtType::Other => "other",
        }
    }
}

impl std::fmt::Display for DebtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One obligation being paid down
///
/// # Example
/// ```
/// use debt_payoff_core_rs::{Debt, DebtType};
/// use rust_decimal_macros::dec;
///
/// let debt = Debt::new("Visa", dec!(2500), dec!(75), dec!(18.5))
///     .with_id("visa")
///     .with_type(DebtType::CreditCard);
///
/// assert_eq!(debt.id(), "visa");
/// assert_eq!(debt.balance(), dec!(2500));
/// assert_eq!(debt.original_balance(), dec!(2500));
/// assert!(!debt.is_paid_off());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique debt identifier
    id: String,

    /// Display label
    name: String,

    /// Balance when the simulation started
    original_balance: Decimal,

    /// Working balance, only ever decreased by the simulator
    balance: Decimal,

    /// Required payment every period
    minimum_payment: Decimal,

    /// Annual percentage rate, e.g. `18.5` for 18.5%
    annual_interest_rate: Decimal,

    debt_type: DebtType,
}

impl Debt {
    /// Create a debt from raw caller input
    ///
    /// No checks are made here; run [`crate::validate`] (or use [`Debt::try_new`])
    /// before simulating.
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        minimum_payment: Decimal,
        annual_interest_rate: Decimal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            original_balance: balance,
            balance,
            minimum_payment,
            annual_interest_rate,
            debt_type: DebtType::Other,
        }
    }

    /// Create a debt, rejecting values that could never amortize
    ///
    /// # Errors
    /// Same per-debt errors as [`crate::validate`].
    pub fn try_new(
        name: impl Into<String>,
        balance: Decimal,
        minimum_payment: Decimal,
        annual_interest_rate: Decimal,
    ) -> Result<Self, InvalidInputError> {
        let debt = Self::new(name, balance, minimum_payment, annual_interest_rate);
        check_debt(&debt)?;
        Ok(debt)
    }

    /// Replace the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_type(mut self, debt_type: DebtType) -> Self {
        self.debt_type = debt_type;
        self
    }

    /// Rebuild a debt mid-simulation (used when restoring checkpoints)
    #[allow(clippy::too_many_arguments)]
    pub fn from_snapshot(
        id: String,
        name: String,
        original_balance: Decimal,
        balance: Decimal,
        minimum_payment: Decimal,
        annual_interest_rate: Decimal,
        debt_type: DebtType,
    ) -> Self {
        Self {
            id,
            name,
            original_balance,
            balance,
            minimum_payment,
            annual_interest_rate,
            debt_type,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_balance(&self) -> Decimal {
        self.original_balance
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }

    pub fn annual_interest_rate(&self) -> Decimal {
        self.annual_interest_rate
    }

    pub fn debt_type(&self) -> DebtType {
        self.debt_type
    }

    /// Monthly rate as a fraction: `annual_interest_rate / 12 / 100`
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_interest_rate / MONTHS_PER_YEAR / PERCENT
    }

    /// Interest the current balance accrues over one period
    pub fn period_interest(&self) -> Decimal {
        self.balance * self.periodic_rate()
    }

    /// Whether the minimum payment outgrows the interest it has to cover
    ///
    /// Checked against the current balance. Since the balance never grows,
    /// a debt that amortizes in its first period amortizes in every period.
    pub fn is_amortizing(&self) -> bool {
        self.minimum_payment > self.period_interest()
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance.is_zero()
    }

    /// Apply one period of interest and payment
    ///
    /// `payment` is capped at `balance + interest`. A balance left at or below
    /// [`PAYOFF_EPSILON`] is snapped to exactly zero.
    ///
    /// Returns the amount actually paid and the interest charged.
    pub(crate) fn apply_period(&mut self, payment: Decimal) -> (Decimal, Decimal) {
        let interest = self.period_interest();
        let paid = payment.min(self.balance + interest);

        let mut new_balance = self.balance - (paid - interest);
        if new_balance <= PAYOFF_EPSILON {
            new_balance = Decimal::ZERO;
        }
        self.balance = new_balance;

        (paid, interest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rate() {
        let debt = Debt::new("Card", dec!(1000), dec!(50), dec!(24));
        assert_eq!(debt.periodic_rate(), dec!(0.02));
        assert_eq!(debt.period_interest(), dec!(20));
    }

    #[test]
    fn test_apply_period_caps_at_balance_plus_interest() {
        let mut debt = Debt::new("Card", dec!(100), dec!(50), dec!(12));
        let (paid, interest) = debt.apply_period(dec!(500));

        assert_eq!(interest, dec!(1));
        assert_eq!(paid, dec!(101));
        assert!(debt.is_paid_off());
    }

    #[test]
    fn test_apply_period_snaps_residue_to_zero() {
        let mut debt = Debt::new("Card", dec!(50.005), dec!(50), dec!(0));
        let (paid, _) = debt.apply_period(dec!(50));

        assert_eq!(paid, dec!(50));
        assert_eq!(debt.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_original_balance_survives_payments() {
        let mut debt = Debt::new("Loan", dec!(1000), dec!(100), dec!(6));
        debt.apply_period(dec!(100));

        assert_eq!(debt.original_balance(), dec!(1000));
        assert_eq!(debt.balance(), dec!(905));
    }

    #[test]
    fn test_debt_type_serde_names() {
        let json = serde_json::to_string(&DebtType::CreditCard).unwrap();
        assert_eq!(json, "\"credit_card\"");
        assert_eq!(DebtType::default(), DebtType::Other);
    }
}
