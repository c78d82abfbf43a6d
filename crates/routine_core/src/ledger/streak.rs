//! Consecutive-day streak computation.
//!
//! A day counts when at least one task was completed on it, whichever task
//! that was. The walk starts at the reference day and never skips an empty
//! reference day to reach yesterday.

use super::completion::CompletionLedger;
use crate::calendar::DayKey;
use chrono::NaiveDateTime;

/// Counts consecutive non-empty days ending at the day of `reference`,
/// inspecting at most `lookback_days` days.
pub fn current_streak(
    ledger: &CompletionLedger,
    reference: NaiveDateTime,
    lookback_days: u32,
) -> u32 {
    let today = DayKey::from_instant(reference);
    let mut streak = 0;
    for offset in 0..lookback_days {
        let Some(key) = today.days_before(u64::from(offset)) else {
            break;
        };
        if ledger.completed_count_for_key(key) == 0 {
            break;
        }
        streak += 1;
    }
    streak
}

impl CompletionLedger {
    /// See [`current_streak`].
    pub fn current_streak(&self, reference: NaiveDateTime, lookback_days: u32) -> u32 {
        current_streak(self, reference, lookback_days)
    }
}
