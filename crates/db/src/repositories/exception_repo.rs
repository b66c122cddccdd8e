//! Repository for the `schedule_exceptions` table.
//!
//! Overrides and cancellation markers for specific dates. The two
//! multi-step writes (`create_override`, `cancel_date`) run inside
//! transactions so a date can never mix a cancellation marker with other
//! rows, and no partial state is observable on failure.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use weekplan_core::schedule::MAX_SLOTS_PER_DAY;
use weekplan_core::types::DbId;

use crate::error::ScheduleError;
use crate::models::exception::{
    CreateOverride, ScheduleException, TYPE_CANCELLATION, TYPE_OVERRIDE,
};

/// Column list for `schedule_exceptions` queries.
const COLUMNS: &str = "id, date, start_time, end_time, exception_type, created_at";

/// Provides data access for schedule exceptions.
pub struct ExceptionRepo;

impl ExceptionRepo {
    /// List exceptions with `date` in `[start, end]` inclusive.
    ///
    /// Ordered by `(date, id)` so the resolver's layering pass is
    /// deterministic when a date carries several rows.
    pub async fn list_in_range(
        pool: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleException>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedule_exceptions \
             WHERE date >= $1 AND date <= $2 \
             ORDER BY date, id"
        );
        sqlx::query_as::<_, ScheduleException>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Count the override rows currently stored for one date.
    pub async fn count_overrides_for_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedule_exceptions WHERE date = $1 AND exception_type = $2",
        )
        .bind(date)
        .bind(TYPE_OVERRIDE)
        .fetch_one(pool)
        .await
    }

    /// Insert an override exception, enforcing the max-2-per-date limit.
    ///
    /// A cancellation marker on the same date is removed in the same
    /// transaction: an override added after a cancel replaces the cancel,
    /// and override and cancellation rows never coexist for a date.
    pub async fn create_override(
        pool: &PgPool,
        dto: &CreateOverride,
    ) -> Result<ScheduleException, ScheduleError> {
        let count = Self::count_overrides_for_date(pool, dto.date).await?;
        if count >= MAX_SLOTS_PER_DAY {
            return Err(ScheduleError::Capacity(format!(
                "Date {} already has the maximum of {} override slots",
                dto.date, MAX_SLOTS_PER_DAY
            )));
        }

        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM schedule_exceptions WHERE date = $1 AND exception_type = $2")
            .bind(dto.date)
            .bind(TYPE_CANCELLATION)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO schedule_exceptions (date, start_time, end_time, exception_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let exception = sqlx::query_as::<_, ScheduleException>(&query)
            .bind(dto.date)
            .bind(dto.start_time)
            .bind(dto.end_time)
            .bind(TYPE_OVERRIDE)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(exception)
    }

    /// Cancel a date: delete every exception stored for it, then insert a
    /// single cancellation marker, all in one transaction.
    ///
    /// Any failure rolls the whole thing back (sqlx rolls back on drop),
    /// so the rows that were present before the call are still present
    /// afterwards. Failures surface as [`ScheduleError::Transaction`].
    pub async fn cancel_date(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<ScheduleException, ScheduleError> {
        let mut tx = pool.begin().await.map_err(ScheduleError::Transaction)?;

        let deleted = sqlx::query("DELETE FROM schedule_exceptions WHERE date = $1")
            .bind(date)
            .execute(&mut *tx)
            .await
            .map_err(ScheduleError::Transaction)?
            .rows_affected();

        let query = format!(
            "INSERT INTO schedule_exceptions (date, exception_type) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let marker = sqlx::query_as::<_, ScheduleException>(&query)
            .bind(date)
            .bind(TYPE_CANCELLATION)
            .fetch_one(&mut *tx)
            .await
            .map_err(ScheduleError::Transaction)?;

        tx.commit().await.map_err(ScheduleError::Transaction)?;

        tracing::debug!(%date, deleted, "Replaced exceptions with cancellation marker");
        Ok(marker)
    }

    /// Delete one exception row by id.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<ScheduleException, ScheduleError> {
        let query = format!("DELETE FROM schedule_exceptions WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ScheduleException>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound { id })
    }

    /// Rewrite the times of one override row.
    ///
    /// The WHERE clause restricts to override rows, so the statement can
    /// never change a row's type or date, and a cancellation marker (which
    /// has no times to rewrite) reports not-found.
    pub async fn update_times_by_id(
        pool: &PgPool,
        id: DbId,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<ScheduleException, ScheduleError> {
        let query = format!(
            "UPDATE schedule_exceptions SET start_time = $2, end_time = $3 \
             WHERE id = $1 AND exception_type = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScheduleException>(&query)
            .bind(id)
            .bind(start_time)
            .bind(end_time)
            .bind(TYPE_OVERRIDE)
            .fetch_optional(pool)
            .await?
            .ok_or(ScheduleError::NotFound { id })
    }
}
