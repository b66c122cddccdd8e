//! Handlers for the `/schedules` API.
//!
//! Request bodies carry dates and times as strings; all parsing and
//! validation happens here, before any repository call. Body shapes and
//! status codes follow the routes table in `routes/schedules.rs`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use weekplan_core::parse;
use weekplan_core::schedule::{ExceptionRecord, RecurringRule, ResolvedWeek};
use weekplan_core::week::{resolve_week, week_end_of, week_start_of};
use weekplan_db::models::exception::CreateOverride;
use weekplan_db::models::recurring_schedule::CreateRecurringSchedule;
use weekplan_db::repositories::{ExceptionRepo, RecurringScheduleRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Query parameters for the week view (`?date=YYYY-MM-DD`, optional).
#[derive(Debug, Deserialize)]
pub struct WeekParams {
    pub date: Option<String>,
}

/// Body for creating a recurring rule.
#[derive(Debug, Deserialize)]
pub struct CreateRecurringRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

/// Body for creating an override exception.
#[derive(Debug, Deserialize)]
pub struct CreateExceptionRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Body for updating an override exception's times.
#[derive(Debug, Deserialize)]
pub struct UpdateExceptionRequest {
    pub start_time: String,
    pub end_time: String,
}

// ---------------------------------------------------------------------------
// Week view
// ---------------------------------------------------------------------------

/// GET /schedules?date=YYYY-MM-DD
///
/// Resolve the 7-day window (Sunday..Saturday) containing `date`, merging
/// recurring rules with that week's exceptions. `date` defaults to today.
pub async fn get_week(
    State(state): State<AppState>,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<DataResponse<ResolvedWeek>>> {
    let target = match params.date.as_deref() {
        Some(raw) => parse::parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    let week_start = week_start_of(target);
    let week_end = week_end_of(target);

    // Rules are weekday-keyed, exceptions date-keyed; the two reads are
    // independent, so issue them concurrently.
    let (schedules, exceptions) = tokio::try_join!(
        RecurringScheduleRepo::list_all(&state.pool),
        ExceptionRepo::list_in_range(&state.pool, week_start, week_end),
    )?;

    let rules: Vec<RecurringRule> = schedules.iter().map(|s| s.to_rule()).collect();
    let records: Vec<ExceptionRecord> = exceptions
        .iter()
        .map(|e| e.to_record())
        .collect::<Result<_, _>>()?;

    let week = resolve_week(target, &rules, &records);
    Ok(Json(DataResponse { data: week }))
}

// ---------------------------------------------------------------------------
// Recurring rules
// ---------------------------------------------------------------------------

/// POST /schedules
///
/// Create a recurring weekly rule. Fails with 409 `CAPACITY_LIMIT` when
/// the weekday already has 2 rules.
pub async fn create_recurring(
    State(state): State<AppState>,
    Json(input): Json<CreateRecurringRequest>,
) -> AppResult<impl IntoResponse> {
    let day_of_week = parse::validate_day_of_week(input.day_of_week)?;
    let start_time = parse::parse_time(&input.start_time)?;
    let end_time = parse::parse_time(&input.end_time)?;
    parse::validate_time_range(start_time, end_time)?;

    let dto = CreateRecurringSchedule {
        day_of_week,
        start_time,
        end_time,
    };
    let schedule = RecurringScheduleRepo::create(&state.pool, &dto).await?;

    tracing::info!(id = schedule.id, day_of_week, "Recurring schedule created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

// ---------------------------------------------------------------------------
// Exceptions
// ---------------------------------------------------------------------------

/// POST /schedules/exceptions
///
/// Create an override exception for one date. Fails with 409
/// `CAPACITY_LIMIT` when the date already has 2 overrides.
pub async fn create_exception(
    State(state): State<AppState>,
    Json(input): Json<CreateExceptionRequest>,
) -> AppResult<impl IntoResponse> {
    let date = parse::parse_date(&input.date)?;
    let start_time = parse::parse_time(&input.start_time)?;
    let end_time = parse::parse_time(&input.end_time)?;
    parse::validate_time_range(start_time, end_time)?;

    let dto = CreateOverride {
        date,
        start_time,
        end_time,
    };
    let exception = ExceptionRepo::create_override(&state.pool, &dto).await?;

    tracing::info!(id = exception.id, %date, "Override exception created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: exception })))
}

/// DELETE /schedules/{date}
///
/// Cancel a date: every exception stored for it is replaced, in one
/// transaction, by a single cancellation marker. The resolver then shows
/// that date as empty.
pub async fn cancel_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<impl IntoResponse> {
    let date = parse::parse_date(&date)?;

    let marker = ExceptionRepo::cancel_date(&state.pool, date).await?;

    tracing::info!(id = marker.id, %date, "Date cancelled");
    Ok(Json(DataResponse { data: marker }))
}

/// DELETE /schedules/exceptions/{id}
///
/// Delete one exception row. 404 when the id does not exist.
pub async fn delete_exception(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let exception = ExceptionRepo::delete_by_id(&state.pool, id).await?;

    tracing::info!(id, date = %exception.date, "Exception deleted");
    Ok(Json(DataResponse { data: exception }))
}

/// PUT /schedules/exceptions/{id}
///
/// Rewrite the times of one override exception. 404 when the id does not
/// exist or targets a cancellation marker; type and date never change.
pub async fn update_exception(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateExceptionRequest>,
) -> AppResult<impl IntoResponse> {
    let start_time = parse::parse_time(&input.start_time)?;
    let end_time = parse::parse_time(&input.end_time)?;
    parse::validate_time_range(start_time, end_time)?;

    let exception = ExceptionRepo::update_times_by_id(&state.pool, id, start_time, end_time).await?;

    tracing::info!(id, date = %exception.date, "Exception updated");
    Ok(Json(DataResponse { data: exception }))
}
