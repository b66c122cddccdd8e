//! HTTP handlers.

pub mod schedules;
