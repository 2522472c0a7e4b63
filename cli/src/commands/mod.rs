//! Command implementations

pub mod compare;
pub mod schedule;
pub mod simulate;
