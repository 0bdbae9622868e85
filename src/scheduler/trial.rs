//! Trial scheduler: request validation, slot catalog, CP solve.
//!
//! # Algorithm
//!
//! 1. Validate the request (formats, duplicates, empty lists).
//! 2. Expand days x times x arenas into the slot catalog.
//! 3. Derive required runs from competitor specialties.
//! 4. Solve the CP model (domains, MRV ordering, backtracking).
//! 5. Return the complete schedule, or an empty schedule with diagnostics.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cp::TrialCpBuilder;
use crate::error::Result;
use crate::models::{
    build_slot_catalog, derive_required_runs, parse_event_day, parse_time_of_day, Arena,
    Competitor, ScheduleOutput,
};
use crate::validation::validate_request;

/// Input container for scheduling.
///
/// Mirrors the JSON request body:
/// `{competitors, arenas, eventDays: ["YYYY-MM-DD"], timeSlots: ["HH:mm"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Competitors to schedule.
    pub competitors: Vec<Competitor>,
    /// Available arenas.
    pub arenas: Vec<Arena>,
    /// Event days (`YYYY-MM-DD`).
    pub event_days: Vec<String>,
    /// Run start times offered each day (`HH:mm`).
    pub time_slots: Vec<String>,
}

impl ScheduleRequest {
    /// Creates a request with no days or times yet.
    pub fn new(competitors: Vec<Competitor>, arenas: Vec<Arena>) -> Self {
        Self {
            competitors,
            arenas,
            event_days: Vec::new(),
            time_slots: Vec::new(),
        }
    }

    /// Sets the event days.
    pub fn with_event_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the start times offered each day.
    pub fn with_time_slots<I, S>(mut self, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_slots = times.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Backtracking trial scheduler.
///
/// # Example
///
/// ```
/// use trial_schedule::scheduler::{ScheduleRequest, TrialScheduler};
/// use trial_schedule::models::{Arena, Competitor};
///
/// let request = ScheduleRequest::new(
///     vec![Competitor::new("C1"), Competitor::new("C2")],
///     vec![Arena::any("A1")],
/// )
/// .with_event_days(["2025-05-01"])
/// .with_time_slots(["09:00", "09:30"]);
///
/// let output = TrialScheduler::new().schedule(&request).unwrap();
/// assert_eq!(output.entry_count(), 2);
/// assert!(output.diagnostics.unplaced_runs.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrialScheduler {
    sort_entries: bool,
}

impl TrialScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts output entries by date, start time and arena instead of
    /// competitor order.
    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Validates and schedules a request.
    ///
    /// Infeasibility is reported through `diagnostics`, not as an error.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleOutput> {
        validate_request(request)?;

        // Formats were checked above
        let days: Vec<NaiveDate> = request
            .event_days
            .iter()
            .map(String::as_str)
            .filter_map(parse_event_day)
            .collect();
        let times: Vec<NaiveTime> = request
            .time_slots
            .iter()
            .map(String::as_str)
            .filter_map(parse_time_of_day)
            .collect();

        Ok(self.schedule_parts(&request.competitors, &request.arenas, &days, &times))
    }

    /// Parses, validates and schedules a JSON request.
    pub fn schedule_json(&self, json: &str) -> Result<ScheduleOutput> {
        let request = ScheduleRequest::from_json(json)?;
        self.schedule(&request)
    }

    /// Schedules already-typed inputs without validation.
    pub fn schedule_parts(
        &self,
        competitors: &[Competitor],
        arenas: &[Arena],
        days: &[NaiveDate],
        times: &[NaiveTime],
    ) -> ScheduleOutput {
        let slots = build_slot_catalog(days, times, arenas);
        let runs = derive_required_runs(competitors);
        debug!(
            slots = slots.len(),
            runs = runs.len(),
            "slot catalog and required runs built"
        );

        let (mut output, solution) = TrialCpBuilder::new(&runs, &slots).solve();
        let stats = solution.stats();

        if output.is_complete() {
            info!(
                placed = output.diagnostics.placed_runs,
                nodes = stats.nodes,
                backtracks = stats.backtracks,
                "all required runs placed"
            );
        } else {
            warn!(
                required = output.diagnostics.required_runs,
                unplaced = output.diagnostics.unplaced_runs.len(),
                "schedule infeasible"
            );
        }

        if self.sort_entries {
            output.sort_entries();
        }
        output
    }
}
