//! Occurrence resolver.
//!
//! # Responsibility
//! - Turn recurring definitions into concrete scheduled instants.
//! - Answer "what is on this day" and "what is coming up" queries.
//!
//! # Invariants
//! - No function here reads the wall clock; reference instants are inputs.

pub mod agenda;
pub mod resolver;

pub use agenda::{
    agenda_for_date, list_agenda, upcoming_within_window, weekday_task_counts, AgendaEntry,
    UpcomingEntry,
};
pub use resolver::{classify, minutes_until, resolve, Classification};
