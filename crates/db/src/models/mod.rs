//! Row models and DTOs for the two schedule tables.

pub mod exception;
pub mod recurring_schedule;
