//! Core simulation infrastructure

pub mod time;

pub use time::{date_after_periods, PayoffDuration, PeriodClock, PERIODS_PER_YEAR};
