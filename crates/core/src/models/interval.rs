use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{ClubError, ClubResult};

/// A half-open time range `[start, end)` in naive local time.
///
/// No timezone is attached. Callers must use one zone consistently; the club
/// runs on its local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> ClubResult<Self> {
        if end <= start {
            return Err(ClubError::Validation(format!(
                "Interval end {} must be after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds `[start, start + minutes)`.
    pub fn starting_at(start: NaiveDateTime, minutes: i64) -> ClubResult<Self> {
        if minutes <= 0 {
            return Err(ClubError::Validation(format!(
                "Duration must be a positive number of minutes, got {}",
                minutes
            )));
        }
        let end = Duration::try_minutes(minutes)
            .and_then(|duration| start.checked_add_signed(duration))
            .ok_or_else(|| {
                ClubError::Validation(format!("Duration of {} minutes is out of range", minutes))
            })?;
        Self::new(start, end)
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.overlaps(b)
}
