//! The weekly resolution algorithm.
//!
//! Merges recurring weekly rules with date-specific exceptions into the
//! final per-day view of a 7-day window. The resolver is a pure function
//! over already-fetched data: data acquisition (and its concurrency) is
//! the caller's concern, and resolution itself has no failure modes for
//! valid input.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::schedule::{DaySchedule, ExceptionKind, ExceptionRecord, RecurringRule, ResolvedWeek, Slot};

/// Number of days in the resolution window.
pub const WEEK_DAYS: u64 = 7;

/// The Sunday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    // num_days_from_sunday is at most 6, well inside NaiveDate's range.
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The Saturday ending the week that contains `date`.
pub fn week_end_of(date: NaiveDate) -> NaiveDate {
    let start = week_start_of(date);
    start.checked_add_days(Days::new(WEEK_DAYS - 1)).unwrap_or(start)
}

/// Resolve the week containing `target`.
///
/// Two-phase build:
///
/// 1. **Baseline.** Every date in the window gets the recurring rules
///    whose `day_of_week` matches its weekday, in input order.
/// 2. **Override layering.** Exceptions are applied in input order. The
///    first exception seen for a date clears that date's baseline slots;
///    an override then contributes its slot, a cancellation contributes
///    nothing. So the presence of *any* exception for a date voids its
///    recurring slots, even when the exception set ends up contributing
///    zero slots.
///
/// Exceptions dated outside the window are ignored. Callers that want
/// deterministic layering for a date carrying several exceptions should
/// pass them in `(date, id)` order, which is what the repository layer
/// returns.
pub fn resolve_week(
    target: NaiveDate,
    rules: &[RecurringRule],
    exceptions: &[ExceptionRecord],
) -> ResolvedWeek {
    let week_start = week_start_of(target);
    let week_end = week_end_of(target);

    // Phase 1: baseline from recurring rules.
    let mut days: Vec<DaySchedule> = (0..WEEK_DAYS)
        .map(|offset| {
            let date = week_start
                .checked_add_days(Days::new(offset))
                .unwrap_or(week_start);
            let day_of_week = date.weekday().num_days_from_sunday() as u8;
            let slots = rules
                .iter()
                .filter(|rule| rule.day_of_week == day_of_week)
                .map(|rule| Slot::Recurring {
                    id: rule.id,
                    start_time: rule.start_time,
                    end_time: rule.end_time,
                })
                .collect();
            DaySchedule {
                date,
                day_of_week,
                slots,
            }
        })
        .collect();

    // Phase 2: layer exceptions over the baseline.
    let mut touched: HashSet<NaiveDate> = HashSet::new();
    for exception in exceptions {
        if exception.date < week_start || exception.date > week_end {
            continue;
        }
        let offset = (exception.date - week_start).num_days() as usize;
        let day = &mut days[offset];

        if touched.insert(exception.date) {
            day.slots.clear();
        }
        if let ExceptionKind::Override {
            start_time,
            end_time,
        } = exception.kind
        {
            day.slots.push(Slot::Override {
                id: exception.id,
                start_time,
                end_time,
            });
        }
    }

    ResolvedWeek {
        week_start,
        week_end,
        days,
    }
}
