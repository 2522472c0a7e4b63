//! Python bindings (PyO3)
//!
//! Exposes the simulator to Python hosts that render results.

pub mod simulator;
pub mod types;
