//! Shift scheduling rules.
//!
//! Everything here is pure: the functions take shifts and time ranges and
//! return decisions, leaving storage and caching to `services::schedule`.
//!
//! - [`overlap`]: half-open interval overlap and per-user conflict lookup
//! - [`split`]: removing a window from a shift
//! - [`generator`]: seeded, reproducible shift plans for a location

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod generator;
pub mod overlap;
pub mod split;

pub use generator::{PlannedShift, generation_key, plan_location_shifts};
pub use overlap::{find_conflict, intervals_overlap};
pub use split::{RemovalPlan, plan_removal};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("start time {start} must be before end time {end}")]
    EmptyRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("start time {start} is after end time {end}")]
    InvertedWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Shift bounds are stored as unix milliseconds; finer input is cut off
/// before any check so the stored record is the one that was validated.
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// A `[start, end)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// A non-empty interval, as required for a stored shift.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SchedulingError> {
        let (start, end) = (truncate_to_millis(start), truncate_to_millis(end));
        if start >= end {
            return Err(SchedulingError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A query window; `start == end` is allowed.
    pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SchedulingError> {
        let (start, end) = (truncate_to_millis(start), truncate_to_millis(end));
        if start > end {
            return Err(SchedulingError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        intervals_overlap(self.start, self.end, other.start, other.end)
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
