//! Retention cutoff for read tracking.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_READTRACKER_CUTOFF_DAYS, READTRACKER_CUTOFF_ENV};
use crate::env_config::env_parse_with_default;
use crate::error::{ReadTrackError, Result};

/// Oldest `posted_on` that still counts for read tracking.
///
/// Posts created before the cutoff are never given a read marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCutoff {
    days: u32,
    at: DateTime<Utc>,
}

impl ReadCutoff {
    /// Cutoff `days` before `now`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the subtraction leaves chrono's range.
    pub fn new(days: u32, now: DateTime<Utc>) -> Result<Self> {
        let at = now.checked_sub_signed(Duration::days(i64::from(days))).ok_or_else(|| {
            ReadTrackError::InvalidConfig(format!("retention window of {days} days is out of range"))
        })?;
        Ok(Self { days, at })
    }

    /// Cutoff `days` before the current time.
    ///
    /// # Errors
    /// See [`ReadCutoff::new`].
    pub fn from_days(days: u32) -> Result<Self> {
        Self::new(days, Utc::now())
    }

    /// Cutoff from `READTRACKER_CUTOFF_DAYS`, falling back to the default window.
    ///
    /// # Errors
    /// See [`ReadCutoff::new`].
    pub fn from_env() -> Result<Self> {
        Self::from_days(configured_cutoff_days())
    }

    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Whether a post created at `posted_on` is inside the window (inclusive).
    #[must_use]
    pub fn admits(&self, posted_on: DateTime<Utc>) -> bool {
        posted_on >= self.at
    }
}

/// Retention window in days from the environment, or the default.
#[must_use]
pub fn configured_cutoff_days() -> u32 {
    env_parse_with_default(READTRACKER_CUTOFF_ENV, DEFAULT_READTRACKER_CUTOFF_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn cutoff_is_days_before_now() {
        let cutoff = ReadCutoff::new(40, now()).unwrap();
        assert_eq!(cutoff.at(), Utc.with_ymd_and_hms(2024, 3, 22, 12, 0, 0).unwrap());
        assert_eq!(cutoff.days(), 40);
    }

    #[test]
    fn boundary_is_inclusive() {
        let cutoff = ReadCutoff::new(1, now()).unwrap();
        assert!(cutoff.admits(cutoff.at()));
        assert!(!cutoff.admits(cutoff.at() - Duration::seconds(1)));
        assert!(cutoff.admits(now()));
    }

    #[test]
    fn zero_days_admits_only_now_and_later() {
        let cutoff = ReadCutoff::new(0, now()).unwrap();
        assert!(cutoff.admits(now()));
        assert!(!cutoff.admits(now() - Duration::milliseconds(1)));
    }
}
