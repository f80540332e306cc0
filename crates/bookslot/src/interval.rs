//! Busy intervals and the per-day interval set.
//!
//! An [`IntervalSet`] is a snapshot: built fresh from the external store's
//! current bookings for one resource on one day, queried, and discarded. It
//! is never persisted and never mutated in place.
//!
//! All interval math is half-open `[start, end)`: touching endpoints do not
//! conflict, so back-to-back bookings are always permitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

// ── BusyInterval ────────────────────────────────────────────────────────────

/// One existing commitment blocking a resource. `owner_id` ties the interval
/// back to the booking that produced it, so that editing a booking can
/// exclude its own current interval from the conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub owner_id: String,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, owner_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            owner_id: owner_id.into(),
        }
    }
}

// ── IntervalSet ─────────────────────────────────────────────────────────────

/// A resource's busy intervals for one day, sorted by start.
///
/// Overlapping or adjacent intervals from distinct bookings are *not*
/// merged — each keeps its `owner_id` — but queries treat the set as a union
/// of coverage.
#[derive(Debug, Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<BusyInterval>,
}

impl IntervalSet {
    /// Build a set from raw booking intervals, sorting by start (then end).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] for any entry with
    /// `end <= start`. Malformed source data is surfaced, never dropped.
    pub fn build(bookings: impl IntoIterator<Item = BusyInterval>) -> Result<Self> {
        let mut intervals: Vec<BusyInterval> = Vec::new();
        for iv in bookings {
            if iv.end <= iv.start {
                return Err(EngineError::InvalidInterval(format!(
                    "booking '{}': end {} <= start {}",
                    iv.owner_id, iv.end, iv.start
                )));
            }
            intervals.push(iv);
        }
        intervals.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        Ok(Self { intervals })
    }

    /// Half-open overlap test: does `[start, end)` intersect any interval
    /// in the set, other than one owned by `exclude_owner`?
    pub fn overlaps(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_owner: Option<&str>,
    ) -> bool {
        for iv in &self.intervals {
            // Sorted by start: nothing past this point can reach back.
            if iv.start >= end {
                break;
            }
            if exclude_owner == Some(iv.owner_id.as_str()) {
                continue;
            }
            if start < iv.end && end > iv.start {
                return true;
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusyInterval> {
        self.intervals.iter()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    /// Minutes after 2025-06-10T00:00:00Z, the fixture day for these tests.
    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
    }

    fn iv(start: i64, end: i64, owner: &str) -> BusyInterval {
        BusyInterval::new(at(start), at(end), owner)
    }

    // ── build ───────────────────────────────────────────────────────────

    #[test]
    fn test_build_sorts_by_start() {
        let set = IntervalSet::build(vec![iv(600, 630, "b"), iv(540, 570, "a")]).unwrap();
        let starts: Vec<_> = set.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec![at(540), at(600)]);
    }

    #[test]
    fn test_build_rejects_empty_interval() {
        let result = IntervalSet::build(vec![iv(540, 540, "a")]);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid interval"), "got: {err}");
        assert!(err.contains("'a'"), "error should name the booking: {err}");
    }

    #[test]
    fn test_build_rejects_inverted_interval() {
        assert!(IntervalSet::build(vec![iv(600, 540, "a")]).is_err());
    }

    #[test]
    fn test_build_keeps_duplicate_coverage() {
        // Two bookings over the same range both survive; identity matters.
        let set = IntervalSet::build(vec![iv(540, 570, "a"), iv(540, 570, "b")]).unwrap();
        assert_eq!(set.len(), 2);
    }

    // ── overlaps ────────────────────────────────────────────────────────

    #[test]
    fn test_overlap_basic() {
        let set = IntervalSet::build(vec![iv(540, 570, "a")]).unwrap();
        assert!(set.overlaps(at(525), at(555), None)); // straddles the start
        assert!(set.overlaps(at(555), at(585), None)); // straddles the end
        assert!(set.overlaps(at(545), at(565), None)); // contained
        assert!(set.overlaps(at(500), at(600), None)); // contains
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        let set = IntervalSet::build(vec![iv(540, 570, "a")]).unwrap();
        assert!(!set.overlaps(at(510), at(540), None)); // ends where it starts
        assert!(!set.overlaps(at(570), at(600), None)); // starts where it ends
    }

    #[test]
    fn test_no_overlap_when_disjoint() {
        let set = IntervalSet::build(vec![iv(540, 570, "a")]).unwrap();
        assert!(!set.overlaps(at(480), at(510), None));
        assert!(!set.overlaps(at(600), at(630), None));
    }

    #[test]
    fn test_empty_set_never_overlaps() {
        let set = IntervalSet::default();
        assert!(!set.overlaps(at(0), at(1440), None));
    }

    #[test]
    fn test_self_exclusion() {
        // Editing booking "x": its own interval must not conflict with itself.
        let set = IntervalSet::build(vec![iv(540, 570, "x")]).unwrap();
        assert!(set.overlaps(at(540), at(570), None));
        assert!(!set.overlaps(at(540), at(570), Some("x")));
    }

    #[test]
    fn test_exclusion_only_skips_matching_owner() {
        let set = IntervalSet::build(vec![iv(540, 570, "x"), iv(555, 585, "y")]).unwrap();
        // Excluding "x" still conflicts through "y".
        assert!(set.overlaps(at(540), at(570), Some("x")));
        assert!(!set.overlaps(at(540), at(555), Some("x")));
    }

    #[test]
    fn test_overlap_spans_multiple_intervals() {
        let set = IntervalSet::build(vec![iv(540, 570, "a"), iv(600, 630, "b")]).unwrap();
        assert!(!set.overlaps(at(570), at(600), None));
        assert!(set.overlaps(at(560), at(610), None));
    }

    // ── randomized: verdict matches the closed-form definition ──────────

    proptest! {
        #[test]
        fn prop_overlap_matches_closed_form(
            a1 in 0i64..1440,
            a_len in 1i64..240,
            b1 in 0i64..1440,
            b_len in 1i64..240,
        ) {
            let (a2, b2) = (a1 + a_len, b1 + b_len);
            let set = IntervalSet::build(vec![iv(b1, b2, "b")]).unwrap();
            let expected = a1 < b2 && a2 > b1;
            prop_assert_eq!(set.overlaps(at(a1), at(a2), None), expected);
        }

        #[test]
        fn prop_self_exclusion_never_conflicts(
            b1 in 0i64..1440,
            b_len in 1i64..240,
        ) {
            let set = IntervalSet::build(vec![iv(b1, b1 + b_len, "only")]).unwrap();
            prop_assert!(!set.overlaps(at(b1), at(b1 + b_len), Some("only")));
        }
    }
}
