use chrono::{DateTime, Utc};

use super::TimeRange;
use crate::database::models::Shift;

/// What removing a window does to one shift.
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalPlan {
    /// The window misses the shift.
    Untouched,
    /// The window covers the shift; delete it.
    Remove,
    /// Replace the shift with these remainders (one or two).
    Split(Vec<Shift>),
}

fn segment(shift: &Shift, start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Shift {
    Shift {
        id: format!("{}-{}", shift.id, start.timestamp_millis()),
        user_id: shift.user_id.clone(),
        location_id: shift.location_id.clone(),
        start_time: start,
        end_time: end,
        shift_type: shift.shift_type.clone(),
        created_by: shift.created_by.clone(),
        created_at: shift.created_at,
        updated_at: now,
    }
}

/// Remove `window` from `shift`.
///
/// Remainders keep the shift's user, location, type and creator; each gets the
/// id `"{shift.id}-{segment start in unix millis}"`.
pub fn plan_removal(shift: &Shift, window: &TimeRange, now: DateTime<Utc>) -> RemovalPlan {
    let span = shift.range();

    if !span.overlaps(window) {
        return RemovalPlan::Untouched;
    }
    if window.contains(&span) {
        return RemovalPlan::Remove;
    }

    let mut segments = Vec::with_capacity(2);
    if span.start < window.start {
        segments.push(segment(shift, span.start, window.start, now));
    }
    if window.end < span.end {
        segments.push(segment(shift, window.end, span.end, now));
    }

    RemovalPlan::Split(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::test_support::*;
    use pretty_assertions::assert_eq;

    fn nine_to_five() -> Shift {
        shift("s1", "alice", range(2, 9, 17))
    }

    #[test]
    fn covering_window_removes_the_shift() {
        let s = nine_to_five();
        assert_eq!(plan_removal(&s, &range(2, 9, 17), at(5, 0)), RemovalPlan::Remove);
        assert_eq!(plan_removal(&s, &range(2, 8, 18), at(5, 0)), RemovalPlan::Remove);
    }

    #[test]
    fn disjoint_or_touching_window_leaves_the_shift() {
        let s = nine_to_five();
        assert_eq!(plan_removal(&s, &range(2, 17, 20), at(5, 0)), RemovalPlan::Untouched);
        assert_eq!(plan_removal(&s, &range(3, 9, 17), at(5, 0)), RemovalPlan::Untouched);
    }

    #[test]
    fn trimming_the_tail_keeps_the_head() {
        let s = nine_to_five();
        let RemovalPlan::Split(segments) = plan_removal(&s, &range(2, 13, 20), at(5, 0)) else {
            panic!("expected a split");
        };

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].range(), range(2, 9, 13));
        assert_eq!(segments[0].id, format!("s1-{}", at(2, 9).timestamp_millis()));
    }

    #[test]
    fn trimming_the_head_keeps_the_tail() {
        let s = nine_to_five();
        let RemovalPlan::Split(segments) = plan_removal(&s, &range(2, 6, 12), at(5, 0)) else {
            panic!("expected a split");
        };

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].range(), range(2, 12, 17));
    }

    #[test]
    fn removing_the_middle_yields_two_segments() {
        let s = nine_to_five();
        let window = range(2, 12, 14);
        let RemovalPlan::Split(segments) = plan_removal(&s, &window, at(5, 0)) else {
            panic!("expected a split");
        };

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].range(), range(2, 9, 12));
        assert_eq!(segments[1].range(), range(2, 14, 17));
        assert_ne!(segments[0].id, segments[1].id);

        // segments and window tile the original without gaps or overlap
        let mut pieces = vec![segments[0].range(), window, segments[1].range()];
        pieces.sort_by_key(|r| r.start);
        assert_eq!(pieces.first().unwrap().start, s.start_time);
        assert_eq!(pieces.last().unwrap().end, s.end_time);
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn segments_keep_owner_and_type() {
        let mut s = nine_to_five();
        s.shift_type = "Night".to_string();
        s.created_by = Some("admin".to_string());

        let RemovalPlan::Split(segments) = plan_removal(&s, &range(2, 10, 11), at(5, 0)) else {
            panic!("expected a split");
        };

        for seg in &segments {
            assert_eq!(seg.user_id, "alice");
            assert_eq!(seg.location_id.as_deref(), Some("loc-1"));
            assert_eq!(seg.shift_type, "Night");
            assert_eq!(seg.created_by.as_deref(), Some("admin"));
            assert_eq!(seg.updated_at, at(5, 0));
        }
    }
}
