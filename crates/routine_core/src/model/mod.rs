//! Recurring task domain model.
//!
//! # Responsibility
//! - Define the task definitions the scheduling engine operates on.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deleting a task removes its definition only; completion history is kept.

pub mod task;
