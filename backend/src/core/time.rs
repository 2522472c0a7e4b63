//! Time management for the simulation
//!
//! The simulation operates in discrete monthly periods. Twelve periods form a year.
//! This module provides deterministic period advancement and the conversions
//! from a period count to a human-facing duration and a calendar date.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of periods (months) in one year
pub const PERIODS_PER_YEAR: usize = 12;

/// Counts elapsed simulation periods
///
/// # Example
/// ```
/// use debt_payoff_core_rs::PeriodClock;
///
/// let mut clock = PeriodClock::new();
/// assert_eq!(clock.current_period(), 0);
/// assert_eq!(clock.current_year(), 0);
///
/// clock.advance_period();
/// assert_eq!(clock.current_period(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodClock {
    /// Total periods elapsed since simulation start
    current_period: usize,
}

impl PeriodClock {
    /// Create a clock at period 0 (nothing simulated yet)
    pub fn new() -> Self {
        Self { current_period: 0 }
    }

    /// Restore a clock at a given period
    ///
    /// # Example
    /// ```
    /// use debt_payoff_core_rs::PeriodClock;
    ///
    /// let clock = PeriodClock::at(30);
    /// assert_eq!(clock.current_year(), 2);
    /// assert_eq!(clock.period_within_year(), 6);
    /// ```
    pub fn at(current_period: usize) -> Self {
        Self { current_period }
    }

    /// Advance time by one period
    pub fn advance_period(&mut self) {
        self.current_period += 1;
    }

    /// Periods completed so far
    pub fn current_period(&self) -> usize {
        self.current_period
    }

    /// Completed years (0-indexed)
    ///
    /// # Example
    /// ```
    /// use debt_payoff_core_rs::PeriodClock;
    ///
    /// let mut clock = PeriodClock::new();
    /// for _ in 0..12 {
    ///     clock.advance_period();
    /// }
    /// assert_eq!(clock.current_year(), 1);
    /// ```
    pub fn current_year(&self) -> usize {
        self.current_period / PERIODS_PER_YEAR
    }

    /// Period within the current year (0-indexed)
    pub fn period_within_year(&self) -> usize {
        self.current_period % PERIODS_PER_YEAR
    }

    /// Check whether the last completed period closed a year
    ///
    /// # Example
    /// ```
    /// use debt_payoff_core_rs::PeriodClock;
    ///
    /// assert!(PeriodClock::at(24).is_end_of_year());
    /// assert!(!PeriodClock::at(25).is_end_of_year());
    /// assert!(!PeriodClock::new().is_end_of_year());
    /// ```
    pub fn is_end_of_year(&self) -> bool {
        self.current_period > 0 && self.period_within_year() == 0
    }
}

/// A period count expressed as whole years plus remaining months
///
/// # Example
/// ```
/// use debt_payoff_core_rs::PayoffDuration;
///
/// let duration = PayoffDuration::from_periods(43);
/// assert_eq!(duration.years, 3);
/// assert_eq!(duration.months, 7);
/// assert_eq!(duration.to_string(), "3 years, 7 months");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffDuration {
    pub years: usize,
    pub months: usize,
}

impl PayoffDuration {
    pub fn from_periods(periods: usize) -> Self {
        Self {
            years: periods / PERIODS_PER_YEAR,
            months: periods % PERIODS_PER_YEAR,
        }
    }

    /// Total months represented
    pub fn total_months(&self) -> usize {
        self.years * PERIODS_PER_YEAR + self.months
    }
}

impl std::fmt::Display for PayoffDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn unit(n: usize, singular: &str) -> String {
            if n == 1 {
                format!("{} {}", n, singular)
            } else {
                format!("{} {}s", n, singular)
            }
        }

        match (self.years, self.months) {
            (0, months) => write!(f, "{}", unit(months, "month")),
            (years, 0) => write!(f, "{}", unit(years, "year")),
            (years, months) => write!(f, "{}, {}", unit(years, "year"), unit(months, "month")),
        }
    }
}

/// Calendar date reached after `periods` months from `start`
///
/// Returns `None` if the date falls outside chrono's representable range.
/// Day-of-month is clamped to the end of shorter months.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use debt_payoff_core_rs::core::time::date_after_periods;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let end = date_after_periods(start, 1).unwrap();
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn date_after_periods(start: NaiveDate, periods: usize) -> Option<NaiveDate> {
    let months = u32::try_from(periods).ok()?;
    start.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_display_singular_and_plural() {
        assert_eq!(PayoffDuration::from_periods(1).to_string(), "1 month");
        assert_eq!(PayoffDuration::from_periods(12).to_string(), "1 year");
        assert_eq!(PayoffDuration::from_periods(13).to_string(), "1 year, 1 month");
        assert_eq!(PayoffDuration::from_periods(0).to_string(), "0 months");
    }

    #[test]
    fn test_total_months_round_trip() {
        for periods in [0, 1, 11, 12, 47, 600] {
            assert_eq!(PayoffDuration::from_periods(periods).total_months(), periods);
        }
    }
}
