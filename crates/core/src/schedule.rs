//! Domain types for the weekly schedule.
//!
//! These are the resolver's inputs and outputs. Database row structs live
//! in `weekplan-db` and convert into these; the conversion is where the
//! nullable `start_time`/`end_time` columns of a cancellation row collapse
//! into the [`ExceptionKind::Cancellation`] variant, so the "cancellation
//! has no times" invariant holds at the type level from here on.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::types::DbId;

/// Maximum number of recurring rules per weekday, and of override
/// exceptions per date. The write paths enforce this before inserting.
pub const MAX_SLOTS_PER_DAY: i64 = 2;

/// A recurring weekly rule: "every `day_of_week`, from `start_time` to
/// `end_time`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringRule {
    pub id: DbId,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// What a date-specific exception does to its date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionKind {
    /// Replace the recurring slots with this one-off slot.
    Override {
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
    /// Clear the date entirely.
    Cancellation,
}

/// A date-specific exception to the recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRecord {
    pub id: DbId,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

/// A single visible slot on a resolved day.
///
/// The `kind` tag tells the client where the slot came from: `recurring`
/// slots are read-only on the calendar, `override` slots are editable and
/// deletable through the exception endpoints (hence both carry their id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Slot {
    Recurring {
        id: DbId,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
    Override {
        id: DbId,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

/// One day of a resolved week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub slots: Vec<Slot>,
}

/// A fully resolved 7-day window, Sunday through Saturday.
///
/// Derived on every request, never stored or cached. `days` always holds
/// exactly 7 entries in window order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DaySchedule>,
}
