//! Engine tuning knobs.
//!
//! # Invariants
//! - `lookahead_minutes` and `streak_lookback_days` are strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default window within which a future occurrence counts as upcoming.
pub const DEFAULT_LOOKAHEAD_MINUTES: u32 = 120;
/// Default number of days the streak walk inspects, today included.
pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 30;
/// Default horizon for highlighting an agenda row as imminent.
pub const DEFAULT_IMMINENT_MINUTES: u32 = 45;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroLookahead,
    ZeroLookback,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLookahead => write!(f, "lookahead_minutes must be greater than zero"),
            Self::ZeroLookback => write!(f, "streak_lookback_days must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Configuration for agenda classification and streak computation.
///
/// Missing fields fall back to defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub lookahead_minutes: u32,
    pub streak_lookback_days: u32,
    pub imminent_minutes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead_minutes: DEFAULT_LOOKAHEAD_MINUTES,
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
            imminent_minutes: DEFAULT_IMMINENT_MINUTES,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead_minutes == 0 {
            return Err(ConfigError::ZeroLookahead);
        }
        if self.streak_lookback_days == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        Ok(())
    }
}
