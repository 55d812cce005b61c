use chrono::{DateTime, Utc};

use super::TimeRange;
use crate::database::models::Shift;

/// Half-open overlap: `[start1, end1)` and `[start2, end2)` share an instant.
pub fn intervals_overlap(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 < end2 && end1 > start2
}

/// First shift of `user_id` in `existing` that overlaps `range`.
///
/// A shift whose id equals `exclude_id` is skipped, so a shift being updated
/// never conflicts with its stored version.
pub fn find_conflict<'a>(
    user_id: &str,
    range: &TimeRange,
    exclude_id: Option<&str>,
    existing: &'a [Shift],
) -> Option<&'a Shift> {
    existing.iter().find(|shift| {
        shift.user_id == user_id
            && Some(shift.id.as_str()) != exclude_id
            && range.overlaps(&shift.range())
    })
}
