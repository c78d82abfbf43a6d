//! Occurrence resolution and classification.
//!
//! # Responsibility
//! - Project a recurring task onto a concrete calendar date.
//! - Classify a scheduled instant relative to a reference instant.
//!
//! # Invariants
//! - Resolution is a pure function of `(task, date)`.
//! - `Past`/`DueNow` compare whole minutes; seconds never split a minute.
//! - The window boundary and `minutes_until` use the real gap.

use crate::model::task::RecurringTask;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Position of a scheduled occurrence relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Scheduled minute is before the reference minute.
    Past,
    /// Scheduled minute equals the reference minute.
    DueNow,
    /// Ahead of the reference, inside the lookahead window.
    Upcoming { minutes_until: i64 },
    /// At or beyond the end of the lookahead window.
    FarFuture,
}

/// Returns the instant `task` is scheduled at on `date`.
///
/// Does not check `days_of_week`; callers filter by weekday first or discard
/// non-matching days.
pub fn resolve(task: &RecurringTask, date: NaiveDate) -> NaiveDateTime {
    date.and_time(task.time_of_day.as_naive_time())
}

/// Classifies `scheduled` against `reference` with a `window_minutes`
/// lookahead.
///
/// `Upcoming` covers occurrences in a later minute whose real gap is below
/// `window_minutes`; a gap of exactly `window_minutes` is `FarFuture`.
pub fn classify(
    scheduled: NaiveDateTime,
    reference: NaiveDateTime,
    window_minutes: u32,
) -> Classification {
    let scheduled_minute = floor_to_minute(scheduled);
    let reference_minute = floor_to_minute(reference);
    if scheduled_minute < reference_minute {
        Classification::Past
    } else if scheduled_minute == reference_minute {
        Classification::DueNow
    } else if scheduled - reference < Duration::minutes(i64::from(window_minutes)) {
        Classification::Upcoming {
            minutes_until: minutes_until(reference, scheduled),
        }
    } else {
        Classification::FarFuture
    }
}

/// Real gap from `reference` to `scheduled`, rounded to the nearest minute
/// (halves round up).
pub fn minutes_until(reference: NaiveDateTime, scheduled: NaiveDateTime) -> i64 {
    let millis = (scheduled - reference).num_milliseconds();
    (millis + MILLIS_PER_MINUTE / 2).div_euclid(MILLIS_PER_MINUTE)
}

fn floor_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(instant)
}
