//! Weekplan domain logic.
//!
//! This crate has zero internal deps so it can be used by both the
//! API/repository layer and any future CLI tooling. It owns the weekly
//! resolution algorithm and the domain types it operates on; everything
//! database- or HTTP-shaped lives in `weekplan-db` and `weekplan-api`.

pub mod error;
pub mod parse;
pub mod schedule;
pub mod types;
pub mod week;
