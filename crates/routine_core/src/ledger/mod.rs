//! Completion ledger.
//!
//! # Responsibility
//! - Track per-day completion of tasks by ID.
//! - Derive the consecutive-day streak from that history.
//!
//! # Invariants
//! - The ledger never consults task definitions; orphaned IDs are harmless.

pub mod completion;
pub mod streak;

pub use completion::CompletionLedger;
pub use streak::current_streak;
