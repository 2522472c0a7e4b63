//! Event logging for simulation replay and auditing.
//!
//! This module defines the [`Event`] enum which captures every state change
//! the simulator makes, and [`PayoffEvent`], the record emitted once per
//! eliminated debt. Events enable:
//! - Debugging (which debt received the snowball, and when)
//! - Auditing (payments and interest per debt per period)
//! - Display (payoff timelines)
//!
//! # Example
//!
//! ```rust
//! use debt_payoff_core_rs::models::Event;
//! use rust_decimal_macros::dec;
//!
//! let event = Event::DebtPaidOff {
//!     period: 14,
//!     debt_id: "visa".to_string(),
//!     payoff_amount: dec!(2500),
//! };
//!
//! assert_eq!(event.period(), 14);
//! assert_eq!(event.event_type(), "DebtPaidOff");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Record of one debt reaching a zero balance
///
/// Emitted exactly once per debt, in the period its balance reached zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffEvent {
    pub debt_id: String,

    /// Period (1-indexed) in which the balance reached zero
    pub period: usize,

    /// The debt's original balance
    pub payoff_amount: Decimal,
}

/// Simulation event capturing a state change.
///
/// All events carry the period they happened in. Events are logged in the
/// order they occur within a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Interest accrued and a payment was applied to a debt
    PaymentApplied {
        period: usize,
        debt_id: String,
        interest: Decimal,
        payment: Decimal,
        /// Part of `payment` that came from the snowball pool
        snowball_portion: Decimal,
        balance_after: Decimal,
    },

    /// A debt's balance reached zero
    DebtPaidOff {
        period: usize,
        debt_id: String,
        payoff_amount: Decimal,
    },

    /// A paid-off debt's minimum payment joined the snowball pool
    SnowballIncreased {
        period: usize,
        debt_id: String,
        freed_amount: Decimal,
        new_pool: Decimal,
    },

    /// Every debt reached zero
    SimulationCompleted {
        period: usize,
        total_interest: Decimal,
        total_paid: Decimal,
    },
}

impl Event {
    pub fn period(&self) -> usize {
        match self {
            Event::PaymentApplied { period, .. }
            | Event::DebtPaidOff { period, .. }
            | Event::SnowballIncreased { period, .. }
            | Event::SimulationCompleted { period, .. } => *period,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PaymentApplied { .. } => "PaymentApplied",
            Event::DebtPaidOff { .. } => "DebtPaidOff",
            Event::SnowballIncreased { .. } => "SnowballIncreased",
            Event::SimulationCompleted { .. } => "SimulationCompleted",
        }
    }

    /// Debt the event refers to, if any
    pub fn debt_id(&self) -> Option<&str> {
        match self {
            Event::PaymentApplied { debt_id, .. }
            | Event::DebtPaidOff { debt_id, .. }
            | Event::SnowballIncreased { debt_id, .. } => Some(debt_id),
            Event::SimulationCompleted { .. } => None,
        }
    }
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_at_period(&self, period: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.period() == period).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_debt(&self, debt_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.debt_id() == Some(debt_id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment(period: usize, debt_id: &str) -> Event {
        Event::PaymentApplied {
            period,
            debt_id: debt_id.to_string(),
            interest: dec!(1),
            payment: dec!(50),
            snowball_portion: dec!(0),
            balance_after: dec!(100),
        }
    }

    #[test]
    fn test_log_queries() {
        let mut log = EventLog::new();
        log.log(payment(1, "a"));
        log.log(payment(1, "b"));
        log.log(payment(2, "a"));
        log.log(Event::DebtPaidOff {
            period: 2,
            debt_id: "a".to_string(),
            payoff_amount: dec!(150),
        });

        assert_eq!(log.len(), 4);
        assert_eq!(log.events_at_period(1).len(), 2);
        assert_eq!(log.events_for_debt("a").len(), 3);
        assert_eq!(log.events_of_type("DebtPaidOff").len(), 1);

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(payment(3, "a")).unwrap();
        assert_eq!(json["type"], "PaymentApplied");
        assert_eq!(json["period"], 3);
    }
}
