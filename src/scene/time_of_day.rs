//! Wall-clock time-of-day classification used by auto mode.

use std::fmt;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Canonical time-of-day buckets. The string form matches `TimeVariant::id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a local clock hour (0-23) to a time-of-day bucket.
///
/// Pre-dawn hours [4, 7) count as dusk. Hour 7 matches none of the explicit
/// ranges and lands on night.
pub fn classify_time_of_day(hour: u32) -> TimeOfDay {
    if (4..7).contains(&hour) {
        return TimeOfDay::Dusk;
    }
    if (8..17).contains(&hour) {
        return TimeOfDay::Day;
    }
    if (17..19).contains(&hour) {
        return TimeOfDay::Dusk;
    }
    TimeOfDay::Night
}

/// Source of the current local hour.
pub trait Clock: Send + Sync {
    fn hour(&self) -> u32;

    fn time_of_day(&self) -> TimeOfDay {
        classify_time_of_day(self.hour())
    }
}

/// Reads the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}
