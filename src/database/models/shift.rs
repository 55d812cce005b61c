use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduling::{SchedulingError, TimeRange, truncate_to_millis};

pub const DEFAULT_SHIFT_TYPE: &str = "Regular";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub user_id: String,
    pub location_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub shift_type: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// Body of `POST /shifts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    pub id: Option<String>,
    pub user_id: String,
    pub location_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub shift_type: Option<String>,
    pub created_by: Option<String>,
}

impl ShiftInput {
    pub fn range(&self) -> Result<TimeRange, SchedulingError> {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn into_shift(self, default_creator: &str) -> Shift {
        let now = Utc::now();
        Shift {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: self.user_id,
            location_id: self.location_id,
            start_time: truncate_to_millis(self.start_time),
            end_time: truncate_to_millis(self.end_time),
            shift_type: self
                .shift_type
                .unwrap_or_else(|| DEFAULT_SHIFT_TYPE.to_string()),
            created_by: self.created_by.or_else(|| Some(default_creator.to_string())),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /shifts`; replaces the stored record with the same id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftInput {
    pub id: String,
    pub user_id: String,
    pub location_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub shift_type: Option<String>,
    pub created_by: Option<String>,
}

impl UpdateShiftInput {
    pub fn range(&self) -> Result<TimeRange, SchedulingError> {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn apply_to(self, shift: &mut Shift) {
        shift.user_id = self.user_id;
        shift.location_id = self.location_id;
        shift.start_time = truncate_to_millis(self.start_time);
        shift.end_time = truncate_to_millis(self.end_time);
        if let Some(shift_type) = self.shift_type {
            shift.shift_type = shift_type;
        }
        if self.created_by.is_some() {
            shift.created_by = self.created_by;
        }
        shift.updated_at = Utc::now();
    }
}

/// `{startTime, endTime}` body shared by range queries and partial deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeRangeInput {
    /// Strict range: start must precede end.
    pub fn range(&self) -> Result<TimeRange, SchedulingError> {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Query window: a single instant is allowed.
    pub fn window(&self) -> Result<TimeRange, SchedulingError> {
        TimeRange::window(self.start_time, self.end_time)
    }
}

/// Result of removing part of a shift.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ShiftRemoval {
    /// The window did not touch the shift.
    Untouched { shift: Shift },
    /// The window covered the whole shift.
    Removed { id: String },
    /// The shift was replaced by the parts outside the window.
    Split {
        #[serde(rename = "removedId")]
        removed_id: String,
        segments: Vec<Shift>,
    },
}
