use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock source used to stamp session start and finish times.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

//
// ─── ELAPSED ───────────────────────────────────────────────────────────────────
//

/// Whole seconds counted by the session timer.
///
/// Only ever grows by one per tick; it is reset by starting or restarting a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Elapsed(u32);

impl Elapsed {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }

    /// One tick of the session clock.
    #[must_use]
    pub fn tick(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Renders as `m:ss`, minutes are not wrapped into hours.
impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats_minutes_and_padded_seconds() {
        assert_eq!(Elapsed::ZERO.to_string(), "0:00");
        assert_eq!(Elapsed::from_secs(9).to_string(), "0:09");
        assert_eq!(Elapsed::from_secs(75).to_string(), "1:15");
        assert_eq!(Elapsed::from_secs(3_600).to_string(), "60:00");
    }

    #[test]
    fn tick_adds_exactly_one_second() {
        let elapsed = Elapsed::ZERO.tick().tick();
        assert_eq!(elapsed.secs(), 2);
        assert_eq!(Elapsed::from_secs(u32::MAX).tick().secs(), u32::MAX);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), FIXED_TEST_TIMESTAMP);
    }
}
