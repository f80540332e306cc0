//! Candidate start-time generation over an operating-hours window.

use crate::error::{EngineError, Result};
use crate::timepoint::TimeOfDay;

/// Candidate start times `window_start, +g, +2g, …`, strictly below
/// `window_end` and inclusive of `window_start`.
///
/// The iterator is a pure generator over its bounds: it is `Clone`, carries
/// no hidden cursor beyond its own position, and [`slot_starts`] called
/// twice with the same arguments yields the same sequence.
#[derive(Debug, Clone)]
pub struct SlotStarts {
    next: u32,
    end: u32,
    granularity: u32,
}

impl Iterator for SlotStarts {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        if self.next >= self.end {
            return None;
        }
        let slot = TimeOfDay::from_minutes(self.next).ok()?;
        self.next += self.granularity;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next >= self.end {
            0
        } else {
            ((self.end - self.next - 1) / self.granularity + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotStarts {}

/// Generate the candidate start times for a day.
///
/// # Errors
///
/// Returns [`EngineError::InvalidWindow`] if `window_end <= window_start`
/// or `granularity_minutes` is zero.
pub fn slot_starts(
    window_start: TimeOfDay,
    window_end: TimeOfDay,
    granularity_minutes: u32,
) -> Result<SlotStarts> {
    if window_end <= window_start {
        return Err(EngineError::InvalidWindow(format!(
            "window end {window_end} must be after start {window_start}"
        )));
    }
    if granularity_minutes == 0 {
        return Err(EngineError::InvalidWindow(
            "granularity must be at least one minute".to_string(),
        ));
    }
    Ok(SlotStarts {
        next: window_start.minutes_from_midnight(),
        end: window_end.minutes_from_midnight(),
        granularity: granularity_minutes,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
