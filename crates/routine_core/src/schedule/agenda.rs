//! Day agenda projection and lookahead queries.
//!
//! # Responsibility
//! - Select the tasks scheduled on a weekday and resolve their occurrences.
//! - Extract the occurrences that fall inside a lookahead window.
//!
//! # Invariants
//! - Agenda order is ascending by scheduled instant.
//! - Equal instants keep the input (creation) order; sorting is stable.

use super::resolver::{classify, resolve, Classification};
use crate::calendar::{reference_date_for_day, CalendarError, DayIndex};
use crate::model::task::RecurringTask;
use chrono::{NaiveDate, NaiveDateTime};

/// One task projected onto a concrete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaEntry<'a> {
    pub task: &'a RecurringTask,
    pub scheduled: NaiveDateTime,
}

/// Agenda entry inside the lookahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingEntry<'a> {
    pub task: &'a RecurringTask,
    pub scheduled: NaiveDateTime,
    pub minutes_until: i64,
}

/// Builds the agenda of weekday `day_index` within the week of
/// `reference_date`.
///
/// # Errors
/// - Returns `CalendarError::InvalidDayIndex` when `day_index > 6`.
/// - Returns `CalendarError::DateOutOfRange` when the projected date does not
///   exist in the calendar.
pub fn list_agenda(
    tasks: &[RecurringTask],
    day_index: u8,
    reference_date: NaiveDate,
) -> Result<Vec<AgendaEntry<'_>>, CalendarError> {
    let day = DayIndex::new(day_index)?;
    let date = reference_date_for_day(day, reference_date).ok_or(
        CalendarError::DateOutOfRange {
            day,
            reference: reference_date,
        },
    )?;
    Ok(agenda_for_date(tasks, date))
}

/// Builds the agenda for a concrete calendar date.
pub fn agenda_for_date(tasks: &[RecurringTask], date: NaiveDate) -> Vec<AgendaEntry<'_>> {
    let day = DayIndex::from_date(date);
    let mut entries: Vec<AgendaEntry<'_>> = tasks
        .iter()
        .filter(|task| task.is_scheduled_on(day))
        .map(|task| AgendaEntry {
            task,
            scheduled: resolve(task, date),
        })
        .collect();
    entries.sort_by_key(|entry| entry.scheduled);
    entries
}

/// Returns agenda entries classified `Upcoming`, nearest first.
pub fn upcoming_within_window<'a>(
    agenda: &[AgendaEntry<'a>],
    reference: NaiveDateTime,
    window_minutes: u32,
) -> Vec<UpcomingEntry<'a>> {
    let mut upcoming: Vec<UpcomingEntry<'a>> = agenda
        .iter()
        .filter_map(|entry| match classify(entry.scheduled, reference, window_minutes) {
            Classification::Upcoming { minutes_until } => Some(UpcomingEntry {
                task: entry.task,
                scheduled: entry.scheduled,
                minutes_until,
            }),
            _ => None,
        })
        .collect();
    upcoming.sort_by_key(|entry| entry.minutes_until);
    upcoming
}

/// Number of tasks scheduled on each weekday, indexed Sunday first.
pub fn weekday_task_counts(tasks: &[RecurringTask]) -> [usize; 7] {
    let mut counts = [0usize; 7];
    for day in DayIndex::all() {
        counts[usize::from(day.value())] =
            tasks.iter().filter(|task| task.is_scheduled_on(day)).count();
    }
    counts
}
