//! Reproducible shift plans for locations without stored shifts.
//!
//! The seed of a location is the sum of the UTF-16 code units of its id. The
//! seed picks which roster members work there, how many of them work each
//! day, and each shift's start hour and length from fixed tables, so the same
//! inputs always produce the same plan.

use chrono::{DateTime, Datelike, Duration, NaiveTime, SecondsFormat, Utc, Weekday};

use super::{TimeRange, find_conflict};
use crate::database::models::Shift;

pub const START_HOURS: [i64; 10] = [6, 7, 8, 9, 10, 14, 15, 16, 18, 22];
pub const DURATION_HOURS: [i64; 5] = [4, 6, 8, 10, 12];
pub const GENERATED_SHIFT_TYPE: &str = "Normal";

/// Windows longer than this are never generated for.
pub const MAX_GENERATION_DAYS: i64 = 93;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedShift {
    pub id: String,
    pub user_id: String,
    pub location_id: String,
    pub range: TimeRange,
}

impl PlannedShift {
    pub fn into_shift(self, now: DateTime<Utc>) -> Shift {
        Shift {
            id: self.id,
            user_id: self.user_id,
            location_id: Some(self.location_id),
            start_time: self.range.start,
            end_time: self.range.end,
            shift_type: GENERATED_SHIFT_TYPE.to_string(),
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn location_seed(location_id: &str) -> u64 {
    location_id.encode_utf16().map(u64::from).sum()
}

fn first_code_unit(id: &str) -> u64 {
    id.encode_utf16().next().map(u64::from).unwrap_or(0)
}

/// The first `count` roster members after a stable, seed-keyed reordering.
pub fn select_users(seed: u64, roster: &[String], count: usize) -> Vec<String> {
    let mut ordered = roster.to_vec();
    ordered.sort_by_key(|id| (seed + first_code_unit(id)) % 1000);
    ordered.truncate(count);
    ordered
}

/// `(start hour, duration in hours)` for the given seed offset.
pub fn shift_pattern(seed: u64, offset: u64) -> (i64, i64) {
    let s = seed + offset;
    let start = START_HOURS[(s % START_HOURS.len() as u64) as usize];
    let duration = DURATION_HOURS[((s + 1) % DURATION_HOURS.len() as u64) as usize];
    (start, duration)
}

/// Cache key marking `window` of `location_id` as already generated.
pub fn generation_key(location_id: &str, window: &TimeRange) -> String {
    format!(
        "{}-{}-{}",
        location_id,
        window.start.to_rfc3339_opts(SecondsFormat::Millis, true),
        window.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Number of whole or partial days in the window.
pub fn day_count(window: &TimeRange) -> i64 {
    let millis = (window.end - window.start).num_milliseconds().max(0);
    (millis + DAY_MS - 1) / DAY_MS
}

fn midnight(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Interval that contains every shift the generator could plan for `window`.
///
/// Existing shifts intersecting it are the ones a plan must not collide with.
pub fn candidate_span(window: &TimeRange) -> TimeRange {
    let first_day = midnight(window.start);
    TimeRange {
        start: first_day,
        end: first_day + Duration::days(day_count(window) + 2),
    }
}

fn is_weekend(day: DateTime<Utc>) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Plan shifts for `location_id` over `window`.
///
/// `roster` is the pool of user ids; `existing` must hold every stored shift
/// intersecting [`candidate_span`]. Candidates that would overlap an existing
/// or already planned shift of the same user are dropped.
pub fn plan_location_shifts(
    location_id: &str,
    window: &TimeRange,
    roster: &[String],
    existing: &[Shift],
) -> Vec<PlannedShift> {
    let seed = location_seed(location_id);
    let selected = select_users(seed, roster, 3 + (seed % 6) as usize);
    let days = day_count(window);

    if selected.is_empty() || days > MAX_GENERATION_DAYS {
        return Vec::new();
    }

    let daily_cap = selected.len().min(4) as u64;
    let mut planned: Vec<PlannedShift> = Vec::new();

    for day_index in 0..=days as u64 {
        let day = window.start + Duration::days(day_index as i64);
        if is_weekend(day) && seed % 3 == 0 {
            continue;
        }

        let users_per_day = 1 + ((seed + day_index) % daily_cap) as usize;
        let day_start = midnight(day);

        for (user_index, user_id) in selected.iter().take(users_per_day).enumerate() {
            let (start_hour, duration) = shift_pattern(seed, day_index + user_index as u64);
            let start = day_start + Duration::hours(start_hour);
            let range = TimeRange {
                start,
                end: start + Duration::hours(duration),
            };

            let taken = find_conflict(user_id, &range, None, existing).is_some()
                || planned
                    .iter()
                    .any(|p| p.user_id == *user_id && p.range.overlaps(&range));
            if taken {
                continue;
            }

            planned.push(PlannedShift {
                id: format!("{}-{}-{}", location_id, user_id, start.timestamp()),
                user_id: user_id.clone(),
                location_id: location_id.to_string(),
                range,
            });
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::test_support::*;
    use pretty_assertions::assert_eq;

    fn roster(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("u{}", i)).collect()
    }

    fn week() -> TimeRange {
        // Monday 2024-01-01 to Monday 2024-01-08
        TimeRange::new(at(1, 0), at(8, 0)).unwrap()
    }

    #[test]
    fn seed_sums_code_units() {
        assert_eq!(location_seed("a"), 97);
        assert_eq!(location_seed("ab"), 97 + 98);
        assert_eq!(location_seed(""), 0);
    }

    #[test]
    fn selection_is_stable_and_bounded() {
        let users = vec!["b2".to_string(), "a1".to_string(), "b1".to_string()];
        // keys: b -> (0 + 98) % 1000, a -> 97; equal keys keep roster order
        assert_eq!(select_users(0, &users, 3), vec!["a1", "b2", "b1"]);
        assert_eq!(select_users(0, &users, 1), vec!["a1"]);
        assert_eq!(select_users(0, &users, 10).len(), 3);
    }

    #[test]
    fn patterns_come_from_the_tables() {
        assert_eq!(shift_pattern(97, 0), (16, 10));
        assert_eq!(shift_pattern(98, 0), (18, 12));
        assert_eq!(shift_pattern(0, 0), (6, 6));
    }

    #[test]
    fn key_uses_millisecond_iso_timestamps() {
        assert_eq!(
            generation_key("loc-1", &week()),
            "loc-1-2024-01-01T00:00:00.000Z-2024-01-08T00:00:00.000Z"
        );
    }

    #[test]
    fn counts_partial_days() {
        assert_eq!(day_count(&week()), 7);
        assert_eq!(day_count(&TimeRange::new(at(1, 0), at(1, 1)).unwrap()), 1);
        assert_eq!(day_count(&TimeRange::window(at(1, 0), at(1, 0)).unwrap()), 0);
    }

    #[test]
    fn same_inputs_give_the_same_plan() {
        let first = plan_location_shifts("1a2b3c4d5678", &week(), &roster(15), &[]);
        let second = plan_location_shifts("1a2b3c4d5678", &week(), &roster(15), &[]);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn first_day_follows_the_seed() {
        // seed 97: four users selected, two work on day 0
        let plan = plan_location_shifts("a", &week(), &roster(5), &[]);
        let day_one: Vec<_> = plan.iter().filter(|p| p.range.start < at(2, 0)).collect();

        assert_eq!(day_one.len(), 2);
        assert_eq!(day_one[0].user_id, "u1");
        assert_eq!(day_one[0].range, TimeRange::new(at(1, 16), at(2, 2)).unwrap());
        assert_eq!(day_one[0].id, format!("a-u1-{}", at(1, 16).timestamp()));
        assert_eq!(day_one[1].user_id, "u2");
        assert_eq!(day_one[1].range, TimeRange::new(at(1, 18), at(2, 6)).unwrap());
    }

    #[test]
    fn planned_shifts_never_overlap_per_user() {
        for location in ["a", "c", "1a2b3c4d5678", "15o6p7q8", "loc-42"] {
            let plan = plan_location_shifts(location, &week(), &roster(6), &[]);
            for (i, a) in plan.iter().enumerate() {
                for b in &plan[i + 1..] {
                    assert!(
                        a.user_id != b.user_id || !a.range.overlaps(&b.range),
                        "{} planned overlapping shifts {:?} and {:?}",
                        location,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn existing_shifts_block_candidates() {
        let blocker = shift("x", "u1", TimeRange::new(at(1, 0), at(12, 0)).unwrap());
        let plan = plan_location_shifts("a", &week(), &roster(5), &[blocker]);

        assert!(!plan.is_empty());
        assert!(plan.iter().all(|p| p.user_id != "u1"));
    }

    #[test]
    fn seed_divisible_by_three_skips_weekends() {
        // 'c' = 99
        let plan = plan_location_shifts("c", &week(), &roster(5), &[]);
        assert!(!plan.is_empty());
        assert!(plan.iter().all(|p| !is_weekend(p.range.start)));

        let plan = plan_location_shifts("a", &week(), &roster(5), &[]);
        assert!(plan.iter().any(|p| is_weekend(p.range.start)));
    }

    #[test]
    fn empty_roster_or_huge_window_plans_nothing() {
        assert!(plan_location_shifts("a", &week(), &[], &[]).is_empty());

        let year = TimeRange::new(at(1, 0), at(1, 0) + Duration::days(365)).unwrap();
        assert!(plan_location_shifts("a", &year, &roster(5), &[]).is_empty());
    }

    #[test]
    fn candidate_span_covers_late_shifts() {
        let span = candidate_span(&week());
        let plan = plan_location_shifts("a", &week(), &roster(5), &[]);

        assert!(plan.iter().all(|p| span.contains(&p.range)));
    }
}
