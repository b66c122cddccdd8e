//! Repository for the `recurring_schedules` table.
//!
//! Recurring rules are append-only in the exposed surface: they are
//! created with a capacity check and listed, never updated or deleted.

use sqlx::PgPool;
use weekplan_core::schedule::MAX_SLOTS_PER_DAY;

use crate::error::ScheduleError;
use crate::models::recurring_schedule::{CreateRecurringSchedule, RecurringSchedule};

/// Column list for `recurring_schedules` queries.
const COLUMNS: &str = "id, day_of_week, start_time, end_time, created_at";

/// Provides data access for recurring weekly rules.
pub struct RecurringScheduleRepo;

impl RecurringScheduleRepo {
    /// List every recurring rule, ordered by id (insertion order).
    ///
    /// No date filter: rules are day-of-week keyed, not date keyed, so the
    /// resolver always needs the full set.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RecurringSchedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recurring_schedules ORDER BY id");
        sqlx::query_as::<_, RecurringSchedule>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count the rules currently stored for one weekday.
    pub async fn count_for_day(pool: &PgPool, day_of_week: u8) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recurring_schedules WHERE day_of_week = $1")
            .bind(i32::from(day_of_week))
            .fetch_one(pool)
            .await
    }

    /// Insert a recurring rule, enforcing the max-2-per-weekday limit.
    ///
    /// The check-then-insert is not atomic against concurrent writers;
    /// acceptable for a single-tenant tool.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateRecurringSchedule,
    ) -> Result<RecurringSchedule, ScheduleError> {
        let count = Self::count_for_day(pool, dto.day_of_week).await?;
        if count >= MAX_SLOTS_PER_DAY {
            return Err(ScheduleError::Capacity(format!(
                "Day {} already has the maximum of {} recurring slots",
                dto.day_of_week, MAX_SLOTS_PER_DAY
            )));
        }

        let query = format!(
            "INSERT INTO recurring_schedules (day_of_week, start_time, end_time) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let schedule = sqlx::query_as::<_, RecurringSchedule>(&query)
            .bind(i32::from(dto.day_of_week))
            .bind(dto.start_time)
            .bind(dto.end_time)
            .fetch_one(pool)
            .await?;
        Ok(schedule)
    }
}
