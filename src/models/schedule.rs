//! Schedule (solution) model.
//!
//! A schedule output is either a complete placement of every required run
//! or an empty schedule with diagnostics explaining which runs could not be
//! placed. Partial schedules are never produced.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_time_of_day, slot_end, Slot, SpecialtyLabel, TIME_FORMAT};

/// One placed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Competitor running.
    pub competitor_id: String,
    /// Arena hosting the run.
    pub arena_id: String,
    /// Event day (`YYYY-MM-DD`).
    pub date: String,
    /// Start time (`HH:mm`).
    pub start_time: String,
    /// End time (`HH:mm`).
    pub end_time: String,
}

/// Why a run could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnplacedReason {
    /// No arena on any day hosts a compatible specialty.
    NoCompatibleSlots,
    /// Every compatible slot was taken by another run.
    SlotsTaken,
    /// The competitor's other runs occupy every compatible start time.
    CompetitorOverlap,
}

/// A run left out of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedRun {
    /// Owning competitor.
    pub competitor_id: String,
    /// Specialty the run required.
    pub specialty_type: SpecialtyLabel,
    /// Human-readable explanation.
    pub reason: UnplacedReason,
}

/// Placement counts and unplaced runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Number of runs derived from the competitors.
    pub required_runs: usize,
    /// Number of runs in the schedule.
    pub placed_runs: usize,
    /// Runs that could not be placed (best-effort explanation).
    pub unplaced_runs: Vec<UnplacedRun>,
}

/// Final solver output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// Placed runs. Empty unless every required run was placed.
    pub schedule: Vec<ScheduleEntry>,
    /// Placement summary.
    pub diagnostics: Diagnostics,
}

/// A hard-constraint violation found by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (competitor or arena).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two runs booked into the same arena at the same time.
    DoubleBookedSlot,
    /// A competitor runs twice at the same time.
    CompetitorOverlap,
    /// An arena's specialty doesn't fit any run of the competitor.
    SpecialtyMismatch,
    /// End time isn't start time + 30 minutes.
    DurationMismatch,
    /// Entry references an arena that doesn't exist.
    UnknownArena,
    /// A competitor has a different number of runs than required.
    RunCountMismatch,
}

impl ScheduleEntry {
    /// Creates the entry for a competitor placed into `slot`.
    pub fn from_slot(competitor_id: impl Into<String>, slot: &Slot) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            arena_id: slot.arena_id.clone(),
            date: slot.date_string(),
            start_time: slot.start_string(),
            end_time: slot.end_string(),
        }
    }

    /// Whether `end_time` is exactly 30 minutes after `start_time`.
    pub fn has_fixed_duration(&self) -> bool {
        match parse_time_of_day(&self.start_time) {
            Some(start) => slot_end(start).format(TIME_FORMAT).to_string() == self.end_time,
            None => false,
        }
    }
}

impl UnplacedReason {
    /// Message reported to callers.
    pub fn message(self) -> &'static str {
        match self {
            Self::NoCompatibleSlots => "No compatible arenas or no time capacity",
            Self::SlotsTaken => "All compatible slots conflict with other runs",
            Self::CompetitorOverlap => "Competitor has overlapping runs at every compatible time",
        }
    }
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl TryFrom<String> for UnplacedReason {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        [
            Self::NoCompatibleSlots,
            Self::SlotsTaken,
            Self::CompetitorOverlap,
        ]
        .into_iter()
        .find(|r| r.message() == value)
        .ok_or_else(|| format!("unknown unplaced reason '{value}'"))
    }
}

impl From<UnplacedReason> for String {
    fn from(reason: UnplacedReason) -> Self {
        reason.message().to_string()
    }
}

impl UnplacedRun {
    /// Creates an unplaced run record.
    pub fn new(
        competitor_id: impl Into<String>,
        specialty_type: SpecialtyLabel,
        reason: UnplacedReason,
    ) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            specialty_type,
            reason,
        }
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl ScheduleOutput {
    /// A complete schedule: every required run placed.
    pub fn complete(schedule: Vec<ScheduleEntry>) -> Self {
        let n = schedule.len();
        Self {
            schedule,
            diagnostics: Diagnostics {
                required_runs: n,
                placed_runs: n,
                unplaced_runs: Vec::new(),
            },
        }
    }

    /// A failed solve: empty schedule plus explanations.
    pub fn infeasible(required_runs: usize, unplaced_runs: Vec<UnplacedRun>) -> Self {
        Self {
            schedule: Vec::new(),
            diagnostics: Diagnostics {
                required_runs,
                placed_runs: 0,
                unplaced_runs,
            },
        }
    }

    /// Whether every required run was placed.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.placed_runs == self.diagnostics.required_runs
            && self.diagnostics.unplaced_runs.is_empty()
    }

    /// Number of schedule entries.
    pub fn entry_count(&self) -> usize {
        self.schedule.len()
    }

    /// Entries for one competitor.
    pub fn entries_for_competitor(&self, competitor_id: &str) -> Vec<&ScheduleEntry> {
        self.schedule
            .iter()
            .filter(|e| e.competitor_id == competitor_id)
            .collect()
    }

    /// Entries hosted by one arena.
    pub fn entries_for_arena(&self, arena_id: &str) -> Vec<&ScheduleEntry> {
        self.schedule
            .iter()
            .filter(|e| e.arena_id == arena_id)
            .collect()
    }

    /// Entries on one event day (`YYYY-MM-DD`).
    pub fn entries_on(&self, date: &str) -> Vec<&ScheduleEntry> {
        self.schedule.iter().filter(|e| e.date == date).collect()
    }

    /// Sorts entries by date, start time, then arena id.
    pub fn sort_entries(&mut self) {
        self.schedule.sort_by(|a, b| {
            (&a.date, &a.start_time, &a.arena_id).cmp(&(&b.date, &b.start_time, &b.arena_id))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(c: &str, a: &str, date: &str, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry {
            competitor_id: c.into(),
            arena_id: a.into(),
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
        }
    }

    fn sample_output() -> ScheduleOutput {
        ScheduleOutput::complete(vec![
            entry("C1", "A2", "2025-05-02", "09:00", "09:30"),
            entry("C2", "A1", "2025-05-01", "09:30", "10:00"),
            entry("C1", "A1", "2025-05-01", "09:00", "09:30"),
        ])
    }

    #[test]
    fn test_complete_output_counts() {
        let out = sample_output();
        assert!(out.is_complete());
        assert_eq!(out.diagnostics.required_runs, 3);
        assert_eq!(out.diagnostics.placed_runs, 3);
        assert_eq!(out.entry_count(), 3);
    }

    #[test]
    fn test_infeasible_output_is_empty() {
        let out = ScheduleOutput::infeasible(
            2,
            vec![UnplacedRun::new("C1", SpecialtyLabel::Any, UnplacedReason::SlotsTaken)],
        );
        assert!(!out.is_complete());
        assert!(out.schedule.is_empty());
        assert_eq!(out.diagnostics.placed_runs, 0);
        assert_eq!(out.diagnostics.required_runs, 2);
    }

    #[test]
    fn test_entry_queries() {
        let out = sample_output();
        assert_eq!(out.entries_for_competitor("C1").len(), 2);
        assert_eq!(out.entries_for_arena("A1").len(), 2);
        assert_eq!(out.entries_on("2025-05-01").len(), 2);
        assert!(out.entries_for_competitor("C9").is_empty());
    }

    #[test]
    fn test_sort_entries() {
        let mut out = sample_output();
        out.sort_entries();
        let keys: Vec<_> = out
            .schedule
            .iter()
            .map(|e| format!("{}|{}|{}", e.date, e.start_time, e.arena_id))
            .collect();
        assert_eq!(
            keys,
            vec!["2025-05-01|09:00|A1", "2025-05-01|09:30|A1", "2025-05-02|09:00|A2"]
        );
    }

    #[test]
    fn test_fixed_duration_check() {
        assert!(entry("C1", "A", "2025-05-01", "09:45", "10:15").has_fixed_duration());
        assert!(!entry("C1", "A", "2025-05-01", "09:45", "10:00").has_fixed_duration());
        assert!(!entry("C1", "A", "2025-05-01", "bad", "10:00").has_fixed_duration());
    }

    #[test]
    fn test_reason_messages_roundtrip_through_json() {
        let run = UnplacedRun::new(
            "C7",
            SpecialtyLabel::BiteWork,
            UnplacedReason::NoCompatibleSlots,
        );
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["competitorId"], "C7");
        assert_eq!(json["specialtyType"], "BiteWork");
        assert_eq!(json["reason"], "No compatible arenas or no time capacity");

        let back: UnplacedRun = serde_json::from_value(json).unwrap();
        assert_eq!(back, run);
    }

    #[test]
    fn test_output_json_shape() {
        let out = ScheduleOutput::infeasible(1, Vec::new());
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["schedule"], serde_json::json!([]));
        assert_eq!(json["diagnostics"]["requiredRuns"], 1);
        assert_eq!(json["diagnostics"]["placedRuns"], 0);
        assert_eq!(json["diagnostics"]["unplacedRuns"], serde_json::json!([]));
    }
}
