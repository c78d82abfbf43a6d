//! Calendar-day utilities shared by the resolver and the completion ledger.
//!
//! # Responsibility
//! - Map instants to canonical day keys (`YYYY-MM-DD`).
//! - Map dates to Sunday-based weekday indices (0..=6).
//! - Locate a weekday inside the week of a reference date.
//!
//! # Invariants
//! - Day keys depend only on the calendar date, never on time-of-day.
//! - `DayIndex` values are always within 0..=6.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

const DAY_LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Calendar argument error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Weekday index outside 0..=6.
    InvalidDayIndex(u8),
    /// Text that is not a `YYYY-MM-DD` calendar date.
    InvalidDayKey(String),
    /// Weekday projection that leaves the representable date range.
    DateOutOfRange { day: DayIndex, reference: NaiveDate },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayIndex(value) => {
                write!(f, "invalid argument: day index {value} is outside 0..=6")
            }
            Self::InvalidDayKey(value) => {
                write!(f, "invalid argument: day key `{value}` is not YYYY-MM-DD")
            }
            Self::DateOutOfRange { day, reference } => write!(
                f,
                "invalid argument: {} of the week of {reference} is out of range",
                day.label()
            ),
        }
    }
}

impl Error for CalendarError {}

/// Weekday index where 0 is Sunday and 6 is Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayIndex(u8);

impl DayIndex {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    /// Validates a raw weekday index.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        if value <= 6 {
            Ok(Self(value))
        } else {
            Err(CalendarError::InvalidDayIndex(value))
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // num_days_from_sunday is always 0..=6.
        Self(date.weekday().num_days_from_sunday() as u8)
    }

    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self::from_date(instant.date())
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Full English day name, e.g. `Wednesday`.
    pub fn label(self) -> &'static str {
        DAY_LABELS[usize::from(self.0)]
    }

    /// Three-letter day name, e.g. `Wed`.
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }

    /// Iterates Sunday through Saturday.
    pub fn all() -> impl Iterator<Item = DayIndex> {
        (0..7).map(Self)
    }
}

impl Display for DayIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for DayIndex {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Canonical identifier of one calendar day, used to bucket completions.
///
/// Formats as `YYYY-MM-DD`, which also sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Strips time-of-day from `instant`.
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self(instant.date())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the key `days` calendar days earlier, or `None` before the
    /// representable range.
    pub fn days_before(self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // Reject shorthand like `2024-1-5`; keys must stay byte-comparable.
        if trimmed.len() != 10 {
            return Err(CalendarError::InvalidDayKey(value.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidDayKey(value.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Returns the date of weekday `day` inside the Sunday-started week that
/// contains `reference`.
///
/// Selecting today's index returns `reference` itself; other indices land
/// earlier or later in the same week. `None` when that date overflows the
/// calendar.
pub fn reference_date_for_day(day: DayIndex, reference: NaiveDate) -> Option<NaiveDate> {
    let today = DayIndex::from_date(reference).value();
    let target = day.value();
    if target >= today {
        reference.checked_add_days(Days::new(u64::from(target - today)))
    } else {
        reference.checked_sub_days(Days::new(u64::from(today - target)))
    }
}
