//! Session-scoped engine state.
//!
//! # Responsibility
//! - Hold tasks and completions in an explicit value instead of a global.
//!
//! # See also
//! - `service::routine_service` for the persisted variant.

pub mod routine_state;

pub use routine_state::{DaySummary, OccurrenceStatus, RoutineState, TodayItem};
