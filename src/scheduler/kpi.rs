//! Schedule quality metrics (KPIs).
//!
//! Computes placement and utilisation figures from a schedule output and
//! the request it answers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | placed runs / required runs |
//! | Slot Utilization | placed runs / catalog size |
//! | Arena Utilization | runs in arena / (days x times) |
//! | Runs per Day | placed runs grouped by event day |
//! | Peak Concurrency | most runs sharing one (date, start) |
//!
//! Per-arena and per-day figures use ordered maps so reports are stable.

use std::collections::BTreeMap;

use crate::models::ScheduleOutput;

use super::ScheduleRequest;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Runs derived from the competitors.
    pub required_runs: usize,
    /// Runs placed in the schedule.
    pub placed_runs: usize,
    /// Fraction of required runs placed (0.0..1.0).
    pub placement_rate: f64,
    /// Number of bookable slots (days x times x arenas).
    pub slot_count: usize,
    /// Fraction of slots used (0.0..1.0).
    pub slot_utilization: f64,
    /// Per-arena utilization (arena_id -> 0.0..1.0).
    pub utilization_by_arena: BTreeMap<String, f64>,
    /// Placed runs per event day.
    pub runs_by_day: BTreeMap<String, usize>,
    /// Largest number of runs starting at the same (date, time).
    pub peak_concurrency: usize,
}

impl ScheduleKpi {
    /// Computes KPIs for `output`, produced from `request`.
    pub fn calculate(output: &ScheduleOutput, request: &ScheduleRequest) -> Self {
        let slots_per_arena = request.event_days.len() * request.time_slots.len();
        let slot_count = slots_per_arena * request.arenas.len();
        let required_runs = output.diagnostics.required_runs;
        let placed_runs = output.schedule.len();

        let mut utilization_by_arena: BTreeMap<String, f64> = request
            .arenas
            .iter()
            .map(|a| (a.id.clone(), 0.0))
            .collect();
        let mut runs_by_day: BTreeMap<String, usize> = BTreeMap::new();
        let mut starts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

        for entry in &output.schedule {
            if let Some(u) = utilization_by_arena.get_mut(&entry.arena_id) {
                *u += 1.0;
            }
            *runs_by_day.entry(entry.date.clone()).or_insert(0) += 1;
            *starts
                .entry((entry.date.as_str(), entry.start_time.as_str()))
                .or_insert(0) += 1;
        }

        for u in utilization_by_arena.values_mut() {
            *u = ratio(*u, slots_per_arena as f64);
        }

        Self {
            required_runs,
            placed_runs,
            placement_rate: if required_runs == 0 {
                1.0
            } else {
                ratio(placed_runs as f64, required_runs as f64)
            },
            slot_count,
            slot_utilization: ratio(placed_runs as f64, slot_count as f64),
            utilization_by_arena,
            runs_by_day,
            peak_concurrency: starts.values().copied().max().unwrap_or(0),
        }
    }

    /// Mean utilization across arenas.
    pub fn avg_arena_utilization(&self) -> f64 {
        if self.utilization_by_arena.is_empty() {
            return 0.0;
        }
        self.utilization_by_arena.values().sum::<f64>() / self.utilization_by_arena.len() as f64
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement: f64, max_slot_utilization: f64) -> bool {
        self.placement_rate >= min_placement && self.slot_utilization <= max_slot_utilization
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den <= 0.0 {
        0.0
    } else {
        num / den
    }
}
