//! Per-day completion ledger.
//!
//! # Responsibility
//! - Record which task IDs were completed on which calendar day.
//! - Answer membership queries without consulting the task collection.
//!
//! # Invariants
//! - A `(day, task)` pair is either present or absent; there are no counts.
//! - Buckets that become empty are dropped, so absent and empty agree.
//! - Entries for deleted tasks are kept and never rejected.

use crate::calendar::DayKey;
use crate::model::task::TaskId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

type DayBuckets = BTreeMap<DayKey, BTreeSet<TaskId>>;

/// Mapping from day key to the set of task IDs completed that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DayBuckets", into = "DayBuckets")]
pub struct CompletionLedger {
    days: DayBuckets,
}

impl From<DayBuckets> for CompletionLedger {
    fn from(mut days: DayBuckets) -> Self {
        days.retain(|_, bucket| !bucket.is_empty());
        Self { days }
    }
}

impl From<CompletionLedger> for DayBuckets {
    fn from(ledger: CompletionLedger) -> Self {
        ledger.days
    }
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips completion of `task_id` on `day` and returns the new state.
    pub fn toggle_completion(&mut self, task_id: TaskId, day: NaiveDate) -> bool {
        let completed = !self.is_completed(task_id, day);
        self.set_completed(task_id, day, completed);
        completed
    }

    /// Forces completion of `task_id` on `day` to `completed`.
    ///
    /// Used when replaying persisted state; repeated calls are idempotent.
    pub fn set_completed(&mut self, task_id: TaskId, day: NaiveDate, completed: bool) {
        let key = DayKey::from_date(day);
        if completed {
            self.days.entry(key).or_default().insert(task_id);
            return;
        }

        if let Some(bucket) = self.days.get_mut(&key) {
            bucket.remove(&task_id);
            if bucket.is_empty() {
                self.days.remove(&key);
            }
        }
    }

    pub fn is_completed(&self, task_id: TaskId, day: NaiveDate) -> bool {
        self.days
            .get(&DayKey::from_date(day))
            .is_some_and(|bucket| bucket.contains(&task_id))
    }

    /// Number of distinct tasks completed on the day identified by `key`.
    pub fn completed_count_for_key(&self, key: DayKey) -> usize {
        self.days.get(&key).map_or(0, BTreeSet::len)
    }

    pub fn completed_count(&self, day: NaiveDate) -> usize {
        self.completed_count_for_key(DayKey::from_date(day))
    }

    /// Task IDs completed on `day`, in ID order.
    pub fn completed_on(&self, day: NaiveDate) -> Vec<TaskId> {
        self.days
            .get(&DayKey::from_date(day))
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Iterates every recorded `(day, task)` pair in day order.
    pub fn entries(&self) -> impl Iterator<Item = (DayKey, TaskId)> + '_ {
        self.days
            .iter()
            .flat_map(|(key, bucket)| bucket.iter().map(move |task_id| (*key, *task_id)))
    }

    /// Returns whether any completion was ever recorded.
    pub fn has_history(&self) -> bool {
        !self.days.is_empty()
    }
}
