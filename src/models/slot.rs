//! Slot catalog.
//!
//! A slot is one bookable (day, time, arena) triple. The catalog is the
//! full cross product of event days, start times and arenas, rebuilt for
//! every solve.
//!
//! # Time Model
//! Dates are calendar days (`YYYY-MM-DD`), times are wall-clock start
//! times (`HH:mm`). Every run lasts [`SLOT_DURATION_MINUTES`]; an end time
//! past midnight wraps around the clock.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use std::cmp::Ordering;

use super::{Arena, SpecialtyLabel};

/// Fixed run duration (minutes).
pub const SLOT_DURATION_MINUTES: i64 = 30;

/// Wire format for event days.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for start and end times.
pub const TIME_FORMAT: &str = "%H:%M";

/// A bookable arena time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Event day.
    pub date: NaiveDate,
    /// Start time.
    pub start: NaiveTime,
    /// End time (`start` + 30 minutes).
    pub end: NaiveTime,
    /// Hosting arena.
    pub arena_id: String,
    /// Hosting arena's specialty label.
    pub specialty: SpecialtyLabel,
}

impl Slot {
    /// Creates the slot for `arena` on `date` at `start`.
    pub fn new(date: NaiveDate, start: NaiveTime, arena: &Arena) -> Self {
        Self {
            date,
            start,
            end: slot_end(start),
            arena_id: arena.id.clone(),
            specialty: arena.specialty_type,
        }
    }

    /// Identity key: `day|time|arenaId`.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.date_string(), self.start_string(), self.arena_id)
    }

    /// Date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Start time as `HH:mm`.
    pub fn start_string(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// End time as `HH:mm`.
    pub fn end_string(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }

    /// Whether both slots begin at the same moment (in any arena).
    #[inline]
    pub fn same_start(&self, other: &Self) -> bool {
        self.date == other.date && self.start == other.start
    }

    /// Candidate order: date, then start time, then arena id.
    pub fn candidate_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.start.cmp(&other.start))
            .then_with(|| self.arena_id.cmp(&other.arena_id))
    }
}

/// End time of a run starting at `start`.
pub fn slot_end(start: NaiveTime) -> NaiveTime {
    start
        .overflowing_add_signed(TimeDelta::minutes(SLOT_DURATION_MINUTES))
        .0
}

/// Builds the full slot catalog.
///
/// One slot per (day, time, arena), ordered day-major, then time, then
/// arena, each in input order. Cardinality = `|days| * |times| * |arenas|`.
pub fn build_slot_catalog(days: &[NaiveDate], times: &[NaiveTime], arenas: &[Arena]) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(days.len() * times.len() * arenas.len());
    for &day in days {
        for &time in times {
            for arena in arenas {
                slots.push(Slot::new(day, time, arena));
            }
        }
    }
    slots
}

/// Parses a strict `YYYY-MM-DD` event day.
pub fn parse_event_day(s: &str) -> Option<NaiveDate> {
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parses a strict `HH:mm` time of day.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let shape_ok = s.len() == 5
        && s.bytes().enumerate().all(|(i, b)| match i {
            2 => b == b':',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}
