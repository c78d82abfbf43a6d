//! Repository layer for routine persistence.
//!
//! # Responsibility
//! - Define the storage contract the service layer writes through.
//! - Isolate SQLite query details from engine state.
//!
//! # Invariants
//! - Repository writes enforce `RecurringTask::validate()` before persistence.

pub mod routine_repo;
