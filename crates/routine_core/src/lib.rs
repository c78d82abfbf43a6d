//! Core engine for the daily routine hub.
//! Resolves recurring tasks onto calendar days, tracks per-day completion,
//! and derives agenda, reminder and streak views from an injected "now".

pub mod calendar;
pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod state;

pub use calendar::{reference_date_for_day, CalendarError, DayIndex, DayKey};
pub use config::{
    ConfigError, EngineConfig, DEFAULT_IMMINENT_MINUTES, DEFAULT_LOOKAHEAD_MINUTES,
    DEFAULT_STREAK_LOOKBACK_DAYS,
};
pub use ledger::CompletionLedger;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    DaysOfWeek, NewTask, Priority, RecurringTask, TaskId, TaskValidationError, TimeOfDay,
};
pub use repo::routine_repo::{RepoError, RepoResult, RoutineRepository, SqliteRoutineRepository};
pub use schedule::{
    agenda_for_date, classify, list_agenda, minutes_until, resolve, upcoming_within_window,
    AgendaEntry, Classification, UpcomingEntry,
};
pub use service::routine_service::{RoutineService, RoutineServiceError, RoutineServiceResult};
pub use state::{DaySummary, OccurrenceStatus, RoutineState, TodayItem};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
