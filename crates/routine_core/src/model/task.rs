//! Recurring task domain model.
//!
//! # Responsibility
//! - Define the canonical recurring task record and its value types.
//! - Validate task definitions at the creation boundary.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `duration_minutes` is strictly positive.
//! - `days_of_week` is non-empty and holds each weekday at most once.
//! - `time_of_day` carries no date; it applies to whichever day it is
//!   projected onto.

use crate::calendar::DayIndex;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time-of-day regex"));

/// Stable identifier for recurring tasks and their ledger entries.
pub type TaskId = Uuid;

const DEFAULT_TIME_HOUR: u8 = 8;
const DEFAULT_DURATION_MINUTES: u32 = 30;
const ALL_DAYS_MASK: u8 = 0b0111_1111;
const WEEKDAYS_MASK: u8 = 0b0011_1110;

/// Validation failure raised when a task definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyTitle,
    /// Time text that is not a 24h `HH:MM` value.
    InvalidTimeOfDay(String),
    ZeroDuration,
    EmptyDaysOfWeek,
    DayIndexOutOfRange(u8),
    /// ID already held by another task in the collection.
    DuplicateId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::InvalidTimeOfDay(value) => {
                write!(f, "invalid time of day `{value}`; expected HH:MM")
            }
            Self::ZeroDuration => write!(f, "task duration must be at least one minute"),
            Self::EmptyDaysOfWeek => write!(f, "task must repeat on at least one weekday"),
            Self::DayIndexOutOfRange(value) => {
                write!(f, "weekday index {value} is outside 0..=6")
            }
            Self::DuplicateId(id) => write!(f, "task id {id} is already in use"),
        }
    }
}

impl Error for TaskValidationError {}

/// Task priority as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time (hour, minute) independent of any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TaskValidationError> {
        if hour > 23 || minute > 59 {
            return Err(TaskValidationError::InvalidTimeOfDay(format!(
                "{hour:02}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the time with seconds and sub-seconds zeroed.
    pub fn as_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hour: DEFAULT_TIME_HOUR,
            minute: 0,
        }
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let captures = TIME_OF_DAY_RE
            .captures(trimmed)
            .ok_or_else(|| TaskValidationError::InvalidTimeOfDay(value.to_string()))?;
        let hour = captures[1]
            .parse::<u8>()
            .map_err(|_| TaskValidationError::InvalidTimeOfDay(value.to_string()))?;
        let minute = captures[2]
            .parse::<u8>()
            .map_err(|_| TaskValidationError::InvalidTimeOfDay(value.to_string()))?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Non-empty set of weekdays a task repeats on.
///
/// Stored as a seven-bit mask (bit 0 = Sunday), so duplicates collapse and
/// iteration is always ascending. Serialized as an array of indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaysOfWeek(u8);

impl DaysOfWeek {
    pub fn from_indices(
        indices: impl IntoIterator<Item = u8>,
    ) -> Result<Self, TaskValidationError> {
        let mut mask = 0u8;
        for index in indices {
            if index > 6 {
                return Err(TaskValidationError::DayIndexOutOfRange(index));
            }
            mask |= 1 << index;
        }
        Self::from_bits(mask)
    }

    /// Rebuilds a set from its persisted bit mask.
    pub fn from_bits(mask: u8) -> Result<Self, TaskValidationError> {
        if mask & !ALL_DAYS_MASK != 0 {
            return Err(TaskValidationError::DayIndexOutOfRange(7));
        }
        if mask == 0 {
            return Err(TaskValidationError::EmptyDaysOfWeek);
        }
        Ok(Self(mask))
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self(WEEKDAYS_MASK)
    }

    pub fn every_day() -> Self {
        Self(ALL_DAYS_MASK)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, day: DayIndex) -> bool {
        self.0 & (1 << day.value()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Always false for a constructed set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_weekday_pattern(self) -> bool {
        self.0 == WEEKDAYS_MASK
    }

    pub fn is_every_day(self) -> bool {
        self.0 == ALL_DAYS_MASK
    }

    /// Iterates members in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = DayIndex> {
        DayIndex::all().filter(move |day| self.contains(*day))
    }
}

impl TryFrom<Vec<u8>> for DaysOfWeek {
    type Error = TaskValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(value)
    }
}

impl From<DaysOfWeek> for Vec<u8> {
    fn from(value: DaysOfWeek) -> Self {
        value.iter().map(DayIndex::value).collect()
    }
}

/// User-supplied definition of a new recurring task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    /// 24h `HH:MM` text, as entered by the user.
    pub time: String,
    pub duration_minutes: u32,
    pub priority: Priority,
    /// Raw weekday indices; validated and deduplicated on creation.
    pub days_of_week: Vec<u8>,
}

impl NewTask {
    /// Creates a definition with the creation-form defaults: 08:00,
    /// 30 minutes, medium priority, Monday through Friday.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            time: TimeOfDay::default().to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            priority: Priority::Medium,
            days_of_week: DaysOfWeek::weekdays().into(),
        }
    }
}

/// Canonical recurring task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurringTask")]
pub struct RecurringTask {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub time_of_day: TimeOfDay,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub days_of_week: DaysOfWeek,
}

impl RecurringTask {
    /// Validates `definition` and assigns a fresh stable ID.
    pub fn create(definition: &NewTask) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), definition)
    }

    /// Validates `definition` under a caller-provided ID.
    ///
    /// Used by persistence and import paths where identity already exists.
    pub fn with_id(id: TaskId, definition: &NewTask) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: definition.title.trim().to_string(),
            description: normalize_description(definition.description.as_deref()),
            time_of_day: definition.time.parse()?,
            duration_minutes: definition.duration_minutes,
            priority: definition.priority,
            days_of_week: DaysOfWeek::from_indices(definition.days_of_week.iter().copied())?,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks invariants that typed fields cannot express on their own.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.duration_minutes == 0 {
            return Err(TaskValidationError::ZeroDuration);
        }
        if self.days_of_week.is_empty() {
            return Err(TaskValidationError::EmptyDaysOfWeek);
        }
        Ok(())
    }

    /// Returns whether this task is on the agenda for weekday `day`.
    pub fn is_scheduled_on(&self, day: DayIndex) -> bool {
        self.days_of_week.contains(day)
    }
}

#[derive(Deserialize)]
struct RawRecurringTask {
    id: TaskId,
    title: String,
    description: Option<String>,
    time_of_day: TimeOfDay,
    duration_minutes: u32,
    priority: Priority,
    days_of_week: DaysOfWeek,
}

impl TryFrom<RawRecurringTask> for RecurringTask {
    type Error = TaskValidationError;

    fn try_from(raw: RawRecurringTask) -> Result<Self, Self::Error> {
        let task = Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            time_of_day: raw.time_of_day,
            duration_minutes: raw.duration_minutes,
            priority: raw.priority,
            days_of_week: raw.days_of_week,
        };
        task.validate()?;
        Ok(task)
    }
}

fn normalize_description(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
