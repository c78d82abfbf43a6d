//! Explicit routine engine state.
//!
//! # Responsibility
//! - Own the task collection and the completion ledger for one session.
//! - Expose the documented mutators (`add_task`, `delete_task`,
//!   `toggle_completion`) and the read-only agenda/streak queries.
//!
//! # Invariants
//! - Tasks are kept in creation order; agenda tie-breaks rely on it.
//! - `delete_task` never touches the ledger.
//! - No query reads the wall clock.

use crate::calendar::{CalendarError, DayIndex};
use crate::config::EngineConfig;
use crate::ledger::CompletionLedger;
use crate::model::task::{NewTask, RecurringTask, TaskId, TaskValidationError};
use crate::schedule::{
    agenda_for_date, classify, list_agenda, minutes_until, upcoming_within_window,
    weekday_task_counts, AgendaEntry, Classification, UpcomingEntry,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Display status of one agenda row at a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceStatus {
    Done,
    Missed,
    DueNow,
    StartsIn { minutes: i64 },
}

/// Agenda row for the reference day, with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayItem<'a> {
    pub task: &'a RecurringTask,
    pub scheduled: NaiveDateTime,
    pub status: OccurrenceStatus,
    /// Scheduled within the imminent horizon (zero minutes included).
    pub is_imminent: bool,
}

/// Headline numbers for the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub completed: usize,
    pub total: usize,
    /// `round(completed / total * 100)`, or 0 with nothing scheduled.
    pub completion_percent: u32,
    pub streak: u32,
}

/// Session state: task definitions plus completion history.
#[derive(Debug, Clone, Default)]
pub struct RoutineState {
    tasks: Vec<RecurringTask>,
    ledger: CompletionLedger,
    config: EngineConfig,
}

impl RoutineState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tasks: Vec::new(),
            ledger: CompletionLedger::new(),
            config,
        }
    }

    /// Rebuilds state from persisted parts; `tasks` must be in creation order.
    pub fn from_parts(
        config: EngineConfig,
        tasks: Vec<RecurringTask>,
        ledger: CompletionLedger,
    ) -> Self {
        Self {
            tasks,
            ledger,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tasks(&self) -> &[RecurringTask] {
        &self.tasks
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn task(&self, task_id: TaskId) -> Option<&RecurringTask> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Validates `definition`, appends the task and returns its new ID.
    pub fn add_task(&mut self, definition: &NewTask) -> Result<TaskId, TaskValidationError> {
        let task = RecurringTask::create(definition)?;
        let id = task.id;
        self.tasks.push(task);
        Ok(id)
    }

    /// Appends an already validated task, e.g. one read back from storage.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::DuplicateId` when the ID is already held.
    pub fn insert_task(&mut self, task: RecurringTask) -> Result<(), TaskValidationError> {
        task.validate()?;
        if self.task(task.id).is_some() {
            return Err(TaskValidationError::DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes the task definition; returns whether it existed.
    ///
    /// Historical ledger entries for `task_id` stay in place.
    pub fn delete_task(&mut self, task_id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != task_id);
        self.tasks.len() != before
    }

    /// Flips completion for `task_id` on `day`; unknown IDs are accepted.
    pub fn toggle_completion(&mut self, task_id: TaskId, day: NaiveDate) -> bool {
        self.ledger.toggle_completion(task_id, day)
    }

    pub fn set_completed(&mut self, task_id: TaskId, day: NaiveDate, completed: bool) {
        self.ledger.set_completed(task_id, day, completed);
    }

    pub fn is_completed(&self, task_id: TaskId, day: NaiveDate) -> bool {
        self.ledger.is_completed(task_id, day)
    }

    pub fn list_agenda(
        &self,
        day_index: u8,
        reference_date: NaiveDate,
    ) -> Result<Vec<AgendaEntry<'_>>, CalendarError> {
        list_agenda(&self.tasks, day_index, reference_date)
    }

    pub fn agenda_for_date(&self, date: NaiveDate) -> Vec<AgendaEntry<'_>> {
        agenda_for_date(&self.tasks, date)
    }

    pub fn classify_occurrence(
        &self,
        scheduled: NaiveDateTime,
        reference: NaiveDateTime,
    ) -> Classification {
        classify(scheduled, reference, self.config.lookahead_minutes)
    }

    /// Today's occurrences inside the configured lookahead window.
    pub fn upcoming(&self, reference: NaiveDateTime) -> Vec<UpcomingEntry<'_>> {
        let agenda = self.agenda_for_date(reference.date());
        upcoming_within_window(&agenda, reference, self.config.lookahead_minutes)
    }

    pub fn current_streak(&self, reference: NaiveDateTime) -> u32 {
        self.ledger
            .current_streak(reference, self.config.streak_lookback_days)
    }

    /// Agenda of the reference day, each row with its display status.
    pub fn today(&self, reference: NaiveDateTime) -> Vec<TodayItem<'_>> {
        let day = reference.date();
        self.agenda_for_date(day)
            .into_iter()
            .map(|entry| {
                let minutes = minutes_until(reference, entry.scheduled);
                let classification = self.classify_occurrence(entry.scheduled, reference);
                let status = if self.ledger.is_completed(entry.task.id, day) {
                    OccurrenceStatus::Done
                } else {
                    match classification {
                        Classification::Past => OccurrenceStatus::Missed,
                        Classification::DueNow => OccurrenceStatus::DueNow,
                        Classification::Upcoming { .. } | Classification::FarFuture => {
                            OccurrenceStatus::StartsIn { minutes }
                        }
                    }
                };
                let is_imminent = match classification {
                    Classification::Past => false,
                    Classification::DueNow => true,
                    Classification::Upcoming { .. } | Classification::FarFuture => {
                        minutes <= i64::from(self.config.imminent_minutes)
                    }
                };
                TodayItem {
                    task: entry.task,
                    scheduled: entry.scheduled,
                    status,
                    is_imminent,
                }
            })
            .collect()
    }

    pub fn day_summary(&self, reference: NaiveDateTime) -> DaySummary {
        let day = reference.date();
        let agenda = self.agenda_for_date(day);
        let total = agenda.len();
        let completed = agenda
            .iter()
            .filter(|entry| self.ledger.is_completed(entry.task.id, day))
            .count();
        DaySummary {
            completed,
            total,
            completion_percent: completion_percent(completed, total),
            streak: self.current_streak(reference),
        }
    }

    /// Task counts per weekday, Sunday first.
    pub fn weekday_task_counts(&self) -> [usize; 7] {
        weekday_task_counts(&self.tasks)
    }

    /// Count for a single weekday.
    pub fn task_count_on(&self, day: DayIndex) -> usize {
        self.weekday_task_counts()[usize::from(day.value())]
    }
}

fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer half-up rounding of completed * 100 / total.
    let scaled = completed.saturating_mul(200).saturating_add(total) / total.saturating_mul(2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
