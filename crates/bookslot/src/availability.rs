//! The availability queries every booking surface routes through.
//!
//! Both functions are pure given their inputs: same snapshot, same answer.
//! Candidate wall-clock starts are converted to instants once each, and the
//! duration is added in instant space, so a slot that crosses a DST
//! transition gets its true elapsed-time end rather than a wall-clock end.
//!
//! These queries only answer the geometric overlap question. Whether a slot
//! also fits the operating window is the slot generator's bound; whether the
//! candidate passes business rules is [`crate::validate`]'s job.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, Result};
use crate::interval::IntervalSet;
use crate::timepoint::{parse_timezone, resolve_local, TimeOfDay};

/// Candidate start times that would conflict with the snapshot.
///
/// For each slot, tests `[start, start + duration)` against `intervals`
/// (half-open), skipping intervals owned by `exclude_owner`. The returned
/// set is the subset of `slots` a booking UI must disable.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] for an unrecognized zone,
/// [`EngineError::InvalidDuration`] for a zero duration.
pub fn blocked_starts(
    slots: impl IntoIterator<Item = TimeOfDay>,
    intervals: &IntervalSet,
    duration_minutes: u32,
    date: NaiveDate,
    zone: &str,
    exclude_owner: Option<&str>,
) -> Result<BTreeSet<TimeOfDay>> {
    if duration_minutes == 0 {
        return Err(EngineError::InvalidDuration(
            "candidate duration must be at least one minute".to_string(),
        ));
    }
    let tz = parse_timezone(zone)?;
    let duration = Duration::minutes(i64::from(duration_minutes));

    let mut blocked = BTreeSet::new();
    for slot in slots {
        let start = resolve_local(date.and_time(slot.to_naive()), &tz)?;
        if intervals.overlaps(start, start + duration, exclude_owner) {
            blocked.insert(slot);
        }
    }
    Ok(blocked)
}

/// Durations from `allowed` that fit at `fixed_start` without conflict.
///
/// The symmetric query: the start time is held fixed and each candidate
/// duration is tested. The allowed-duration menu is caller configuration
/// (e.g. `{15, 30, 45, 60}`), not something this engine generates.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] for an unrecognized zone,
/// [`EngineError::InvalidDuration`] if `allowed` contains a zero.
pub fn feasible_durations(
    allowed: impl IntoIterator<Item = u32>,
    intervals: &IntervalSet,
    fixed_start: TimeOfDay,
    date: NaiveDate,
    zone: &str,
    exclude_owner: Option<&str>,
) -> Result<BTreeSet<u32>> {
    let tz = parse_timezone(zone)?;
    let start = resolve_local(date.and_time(fixed_start.to_naive()), &tz)?;

    let mut feasible = BTreeSet::new();
    for duration_minutes in allowed {
        if duration_minutes == 0 {
            return Err(EngineError::InvalidDuration(
                "allowed durations must be at least one minute".to_string(),
            ));
        }
        let end = start + Duration::minutes(i64::from(duration_minutes));
        if !intervals.overlaps(start, end, exclude_owner) {
            feasible.insert(duration_minutes);
        }
    }
    Ok(feasible)
}

// ── Tests ───────────────────────────────────────────────────────────────────
