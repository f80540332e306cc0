//! Business-rule gate run before a booking mutation is sent to the store.
//!
//! Every entry point (booking panel, drag-to-reschedule, quick-add) calls
//! [`validate`] with the same candidate shape, so the rules cannot drift
//! between screens. The "now" anchor is an explicit argument: the engine
//! never reads the system clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::timepoint::{to_local, TimeOfDay};

/// A booking as proposed by the user, before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCandidate {
    /// The staff member whose time is being booked.
    pub resource_id: String,
    pub contact_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub duration_minutes: u32,
    /// IANA zone the booking's wall clock is interpreted in.
    pub zone: String,
}

/// Whether the candidate creates a new booking or edits an existing one.
/// Past-date rejection applies only to creation: historical bookings stay
/// editable (e.g. correcting a service or contact after the fact).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingMode {
    Create,
    Edit,
}

/// Validate a candidate against the pre-submission business rules, in
/// order: required identifiers present, positive duration, and (on create)
/// a date no earlier than "today" in the booking's zone.
///
/// # Errors
///
/// The first failing rule is returned as its typed error —
/// [`EngineError::MissingField`] naming the field,
/// [`EngineError::InvalidDuration`], or [`EngineError::PastDate`] — so the
/// calling UI can highlight the specific offending input.
pub fn validate(candidate: &BookingCandidate, mode: BookingMode, now: DateTime<Utc>) -> Result<()> {
    required(&candidate.resource_id, "resource_id")?;
    required(&candidate.contact_id, "contact_id")?;
    required(&candidate.service_id, "service_id")?;

    if candidate.duration_minutes == 0 {
        return Err(EngineError::InvalidDuration(
            "duration must be at least one minute".to_string(),
        ));
    }

    if mode == BookingMode::Create {
        let today = to_local(now, &candidate.zone)?.date;
        if candidate.date < today {
            return Err(EngineError::PastDate(format!(
                "{} is before today ({today}) in {}",
                candidate.date, candidate.zone
            )));
        }
    }

    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngineError::MissingField(field));
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candidate(date: NaiveDate) -> BookingCandidate {
        BookingCandidate {
            resource_id: "staff-7".to_string(),
            contact_id: "contact-12".to_string(),
            service_id: "svc-cut".to_string(),
            date,
            start_time: TimeOfDay::from_hm(9, 0).unwrap(),
            duration_minutes: 30,
            zone: "Europe/Rome".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// June 10, 2025, 10:00 in Rome (08:00 UTC).
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(validate(&candidate(date(2025, 6, 10)), BookingMode::Create, now()).is_ok());
        assert!(validate(&candidate(date(2025, 6, 11)), BookingMode::Create, now()).is_ok());
    }

    #[test]
    fn test_missing_fields_named_in_order() {
        let mut c = candidate(date(2025, 6, 10));
        c.resource_id = String::new();
        c.contact_id = "  ".to_string();
        let err = validate(&c, BookingMode::Create, now()).unwrap_err();
        // resource_id is checked first even though contact_id is also blank.
        assert_eq!(err.to_string(), "Missing field: resource_id");

        c.resource_id = "staff-7".to_string();
        let err = validate(&c, BookingMode::Create, now()).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: contact_id");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut c = candidate(date(2025, 6, 10));
        c.duration_minutes = 0;
        let err = validate(&c, BookingMode::Create, now()).unwrap_err();
        assert!(err.to_string().contains("Invalid duration"), "got: {err}");
    }

    #[test]
    fn test_past_date_rejected_on_create() {
        let err = validate(&candidate(date(2025, 6, 9)), BookingMode::Create, now()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Past date"), "got: {msg}");
    }

    #[test]
    fn test_past_date_allowed_on_edit() {
        // Correcting a historical booking is legitimate.
        assert!(validate(&candidate(date(2025, 6, 9)), BookingMode::Edit, now()).is_ok());
        assert!(validate(&candidate(date(2024, 1, 1)), BookingMode::Edit, now()).is_ok());
    }

    #[test]
    fn test_today_judged_in_booking_zone_not_utc() {
        // 02:00 UTC on June 11 is still the evening of June 10 in Los
        // Angeles, so a June 10 booking there is not past-dated.
        let late_now = Utc.with_ymd_and_hms(2025, 6, 11, 2, 0, 0).unwrap();
        let mut c = candidate(date(2025, 6, 10));
        c.zone = "America/Los_Angeles".to_string();
        assert!(validate(&c, BookingMode::Create, late_now).is_ok());

        // The same instant in Rome is already June 11: June 10 is past.
        let c = candidate(date(2025, 6, 10));
        assert!(validate(&c, BookingMode::Create, late_now).is_err());
    }

    #[test]
    fn test_invalid_zone_surfaces() {
        let mut c = candidate(date(2025, 6, 10));
        c.zone = "Salon/BackRoom".to_string();
        let err = validate(&c, BookingMode::Create, now()).unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_duration_checked_before_date() {
        // Rule order is fixed: a candidate that is both zero-length and
        // past-dated reports the duration first.
        let mut c = candidate(date(2025, 6, 9));
        c.duration_minutes = 0;
        let err = validate(&c, BookingMode::Create, now()).unwrap_err();
        assert!(err.to_string().contains("Invalid duration"), "got: {err}");
    }
}
