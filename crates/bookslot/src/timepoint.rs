//! Wall-clock value types and timezone conversion.
//!
//! All comparisons inside the engine happen on absolute instants
//! (`DateTime<Utc>`). Wall-clock values — a calendar date plus a
//! [`TimeOfDay`] in a named IANA zone — exist only at the boundary and are
//! converted through [`to_instant`] / [`to_local`]. Both functions are pure:
//! no system clock, no ambient configuration.
//!
//! # DST Policy
//!
//! Named-zone wall clocks are not total functions into instants. This module
//! commits to one deterministic resolution, applied everywhere:
//!
//! - **Spring-forward gap** (nonexistent local time, e.g. 02:30 on the day
//!   clocks jump 02:00 → 03:00): resolve to the *first valid instant at or
//!   after* the gap.
//! - **Fall-back ambiguity** (a local time that occurs twice): resolve to
//!   the *earlier* of the two instants.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Upper bound on the forward scan out of a DST gap. Real-world gaps are at
/// most a few hours (Lord Howe Island is 30 minutes; most zones are 60).
const MAX_GAP_SCAN_MINUTES: i64 = 24 * 60;

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A time of day with minute precision, independent of any calendar date.
///
/// Replaces the throwaway "anchor date" pattern (pinning times to an
/// arbitrary date just to compare them): a `TimeOfDay` compares and sorts
/// directly, and only becomes an instant when paired with a date and zone
/// via [`to_instant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Minutes since midnight. Invariant: `< 1440`.
    minutes: u32,
}

impl TimeOfDay {
    /// Construct from an hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTime`] if either component is out of
    /// range.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(EngineError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Construct from minutes since midnight (must be `< 1440`).
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(EngineError::InvalidTime(format!(
                "{minutes} minutes from midnight"
            )));
        }
        Ok(Self { minutes })
    }

    pub fn hour(self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes % 60
    }

    pub fn minutes_from_midnight(self) -> u32 {
        self.minutes
    }

    /// The equivalent `NaiveTime` (always representable by the invariant).
    pub(crate) fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    /// Parse a 24-hour `"HH:MM"` string.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidTime(format!("'{s}': expected 24-hour HH:MM"));
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        // Reject "9:00" and "09:0" up front: the UI contract is zero-padded.
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── LocalTimePoint ──────────────────────────────────────────────────────────

/// A wall-clock moment in a named IANA timezone. The display-side
/// counterpart of an instant; never used for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalTimePoint {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    /// IANA zone name the wall clock is interpreted in.
    pub zone: String,
}

// ── Conversion ──────────────────────────────────────────────────────────────

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimezone(format!("'{s}'")))
}

/// Interpret a wall-clock date + time in `zone` and return the absolute
/// instant, applying the module-level DST policy.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] if `zone` is not a recognized
/// IANA identifier.
pub fn to_instant(date: NaiveDate, time: TimeOfDay, zone: &str) -> Result<DateTime<Utc>> {
    let tz = parse_timezone(zone)?;
    resolve_local(date.and_time(time.to_naive()), &tz)
}

/// Convert an absolute instant to the wall clock in `zone`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimezone`] if `zone` is not a recognized
/// IANA identifier. Never fails for a valid zone.
pub fn to_local(instant: DateTime<Utc>, zone: &str) -> Result<LocalTimePoint> {
    let tz = parse_timezone(zone)?;
    let local = instant.with_timezone(&tz);
    let time = TimeOfDay::from_hm(local.hour(), local.minute())?;
    Ok(LocalTimePoint {
        date: local.date_naive(),
        time,
        zone: zone.to_string(),
    })
}

/// Map a naive local datetime onto an instant under the DST policy:
/// ambiguous → earlier instant, nonexistent → first valid instant at or
/// after the gap (forward one-minute scan, bounded).
pub(crate) fn resolve_local(naive: NaiveDateTime, tz: &Tz) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..MAX_GAP_SCAN_MINUTES {
                probe += Duration::minutes(1);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return Ok(dt.with_timezone(&Utc));
                }
            }
            Err(EngineError::InvalidTime(format!(
                "'{naive}' does not exist in {tz} and no valid instant follows it"
            )))
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
