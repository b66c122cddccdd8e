//! Models for the `recurring_schedules` table.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use weekplan_core::schedule::RecurringRule;
use weekplan_core::types::{DbId, Timestamp};

/// A row from the `recurring_schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecurringSchedule {
    pub id: DbId,
    /// 0 = Sunday .. 6 = Saturday (CHECK-constrained in the schema).
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Timestamp,
}

impl RecurringSchedule {
    /// Convert into the domain type the resolver consumes.
    pub fn to_rule(&self) -> RecurringRule {
        RecurringRule {
            id: self.id,
            // In range 0..=6 per the schema CHECK.
            day_of_week: self.day_of_week as u8,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// DTO for inserting a recurring rule. Built by the handler layer after
/// input validation.
#[derive(Debug, Clone)]
pub struct CreateRecurringSchedule {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
