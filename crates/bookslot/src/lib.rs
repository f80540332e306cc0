//! # bookslot
//!
//! Appointment availability engine for resource scheduling (salon staff,
//! service providers): half-open interval overlap, candidate slot
//! generation, wall-clock ⇄ instant conversion with a documented DST
//! policy, and pre-submission booking validation.
//!
//! Every operation is a stateless pure function over a snapshot the caller
//! provides. The engine performs no I/O, holds no ambient state (no
//! "current business", no implicit timezone, no system clock), and never
//! retries or swallows an error.
//!
//! ## Modules
//!
//! - [`timepoint`] — `TimeOfDay`, `LocalTimePoint`, and timezone conversion
//! - [`interval`] — `BusyInterval` and the sorted per-day `IntervalSet`
//! - [`slots`] — candidate start-time generation over an operating window
//! - [`availability`] — blocked starts and feasible durations over a snapshot
//! - [`validate`] — business-rule checks before a booking mutation
//! - [`error`] — error types
//!
//! ## Snapshots are advisory
//!
//! An [`interval::IntervalSet`] can go stale the instant another client
//! books against the same resource. These queries are a UX aid, not a
//! correctness guarantee: the authoritative conflict check must be enforced
//! at the store (an exclusion constraint or transactional check-then-insert).
//! Treat the store-side check as required defense-in-depth, not an optional
//! extra.

pub mod availability;
pub mod error;
pub mod interval;
pub mod slots;
pub mod timepoint;
pub mod validate;

pub use availability::{blocked_starts, feasible_durations};
pub use error::EngineError;
pub use interval::{BusyInterval, IntervalSet};
pub use slots::{slot_starts, SlotStarts};
pub use timepoint::{to_instant, to_local, LocalTimePoint, TimeOfDay};
pub use validate::{validate, BookingCandidate, BookingMode};
