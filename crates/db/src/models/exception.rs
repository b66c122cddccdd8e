//! Models for the `schedule_exceptions` table.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use weekplan_core::error::CoreError;
use weekplan_core::schedule::{ExceptionKind, ExceptionRecord};
use weekplan_core::types::{DbId, Timestamp};

/// Value of `exception_type` for an override row.
pub const TYPE_OVERRIDE: &str = "override";

/// Value of `exception_type` for a cancellation marker.
pub const TYPE_CANCELLATION: &str = "cancellation";

/// A row from the `schedule_exceptions` table.
///
/// The nullable times mirror the schema; converting to the domain
/// [`ExceptionRecord`] collapses them into the tagged
/// [`ExceptionKind`] so nothing downstream deals with half-null rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleException {
    pub id: DbId,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub exception_type: String,
    pub created_at: Timestamp,
}

impl ScheduleException {
    /// Convert into the domain type the resolver consumes.
    ///
    /// The schema CHECK guarantees the type/times combinations; a row that
    /// violates them anyway (hand-edited data) surfaces as an internal
    /// error rather than being silently misread.
    pub fn to_record(&self) -> Result<ExceptionRecord, CoreError> {
        let kind = match (self.exception_type.as_str(), self.start_time, self.end_time) {
            (TYPE_OVERRIDE, Some(start_time), Some(end_time)) => ExceptionKind::Override {
                start_time,
                end_time,
            },
            (TYPE_CANCELLATION, None, None) => ExceptionKind::Cancellation,
            _ => {
                return Err(CoreError::Internal(format!(
                    "schedule_exceptions row {} has inconsistent type/times",
                    self.id
                )))
            }
        };
        Ok(ExceptionRecord {
            id: self.id,
            date: self.date,
            kind,
        })
    }
}

/// DTO for inserting an override exception. Built by the handler layer
/// after input validation.
#[derive(Debug, Clone)]
pub struct CreateOverride {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
