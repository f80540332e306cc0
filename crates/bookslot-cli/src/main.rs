//! `bookslot` — query the availability engine from the command line.
//!
//! Stands in for the UI-layer caller: load a JSON snapshot of existing
//! bookings (the shape the external store's read returns), build an
//! `IntervalSet`, and print the engine's answer. Handy for scripting and
//! for checking a day's availability without a front end.
//!
//! The system clock is read here, never inside the engine: `check` defaults
//! its "now" anchor to `Utc::now()` but accepts `--now` for reproducible
//! runs.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use bookslot::{
    blocked_starts, feasible_durations, slot_starts, validate, BookingCandidate, BookingMode,
    BusyInterval, IntervalSet, TimeOfDay,
};

#[derive(Parser)]
#[command(name = "bookslot", version, about = "Appointment availability queries")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the candidate start times for an operating window.
    Slots {
        /// Operating window as HH:MM-HH:MM.
        #[arg(long, default_value = "06:00-21:00")]
        window: String,
        /// Slot spacing in minutes.
        #[arg(long, default_value_t = 15)]
        granularity: u32,
    },
    /// Print the start times a booking of the given duration cannot use.
    Blocked {
        /// JSON snapshot of existing bookings.
        #[arg(long)]
        snapshot: PathBuf,
        /// Calendar day to query (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// IANA timezone the day is interpreted in.
        #[arg(long)]
        zone: String,
        /// Candidate duration in minutes.
        #[arg(long)]
        duration: u32,
        #[arg(long, default_value = "06:00-21:00")]
        window: String,
        #[arg(long, default_value_t = 15)]
        granularity: u32,
        /// Booking id to ignore (when re-timing an existing booking).
        #[arg(long)]
        exclude_owner: Option<String>,
    },
    /// Print which of the allowed durations fit at a fixed start time.
    Durations {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        zone: String,
        /// Fixed start time (HH:MM).
        #[arg(long)]
        start: TimeOfDay,
        /// Duration menu in minutes, comma separated.
        #[arg(long, value_delimiter = ',')]
        allowed: Vec<u32>,
        #[arg(long)]
        exclude_owner: Option<String>,
    },
    /// Validate a booking candidate before submission.
    Check {
        /// JSON file holding the candidate.
        #[arg(long)]
        candidate: PathBuf,
        /// Validate as an edit of an existing booking (past dates allowed).
        #[arg(long)]
        edit: bool,
        /// Override the "now" anchor (RFC 3339); defaults to the system clock.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

/// One row of the external store's booking read.
#[derive(Debug, Deserialize)]
struct BookingRecord {
    id: String,
    start: DateTime<Utc>,
    duration_minutes: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Slots {
            window,
            granularity,
        } => {
            let (start, end) = parse_window(&window)?;
            let slots: Vec<TimeOfDay> = slot_starts(start, end, granularity)?.collect();
            print_json(&slots)
        }
        Command::Blocked {
            snapshot,
            date,
            zone,
            duration,
            window,
            granularity,
            exclude_owner,
        } => {
            let intervals = load_snapshot(&snapshot)?;
            let (start, end) = parse_window(&window)?;
            let slots = slot_starts(start, end, granularity)?;
            let blocked = blocked_starts(
                slots,
                &intervals,
                duration,
                date,
                &zone,
                exclude_owner.as_deref(),
            )?;
            print_json(&blocked)
        }
        Command::Durations {
            snapshot,
            date,
            zone,
            start,
            allowed,
            exclude_owner,
        } => {
            let intervals = load_snapshot(&snapshot)?;
            let feasible = feasible_durations(
                allowed,
                &intervals,
                start,
                date,
                &zone,
                exclude_owner.as_deref(),
            )?;
            print_json(&feasible)
        }
        Command::Check {
            candidate,
            edit,
            now,
        } => {
            let raw = fs::read_to_string(&candidate)
                .with_context(|| format!("reading candidate {}", candidate.display()))?;
            let candidate: BookingCandidate = serde_json::from_str(&raw)
                .context("candidate file is not a valid booking candidate")?;
            let mode = if edit {
                BookingMode::Edit
            } else {
                BookingMode::Create
            };
            validate(&candidate, mode, now.unwrap_or_else(Utc::now))?;
            println!("ok");
            Ok(())
        }
    }
}

/// Read a JSON array of booking records and build the engine's snapshot.
fn load_snapshot(path: &PathBuf) -> Result<IntervalSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let records: Vec<BookingRecord> =
        serde_json::from_str(&raw).context("snapshot is not a JSON array of bookings")?;
    let intervals = records.into_iter().map(|r| {
        let end = r.start + Duration::minutes(i64::from(r.duration_minutes));
        BusyInterval::new(r.start, end, r.id)
    });
    Ok(IntervalSet::build(intervals)?)
}

fn parse_window(s: &str) -> Result<(TimeOfDay, TimeOfDay)> {
    let Some((start, end)) = s.split_once('-') else {
        bail!("window must be HH:MM-HH:MM, got '{s}'");
    };
    Ok((start.parse()?, end.parse()?))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
