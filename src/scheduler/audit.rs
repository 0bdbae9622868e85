//! Independent schedule audit.
//!
//! Re-checks a schedule output against the request's hard constraints
//! without trusting the solver: arena slots booked once, competitors never
//! in two places at once, arena specialties fit the competitor, fixed run
//! duration, and each competitor holding exactly its required number of
//! runs (complete schedules only).

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Arena, ScheduleOutput, Violation, ViolationType};

use super::ScheduleRequest;

/// Audits `output` against `request`.
///
/// Returns every violation found, in schedule order. An empty result means
/// the schedule honours all hard constraints.
pub fn audit_schedule(output: &ScheduleOutput, request: &ScheduleRequest) -> Vec<Violation> {
    let mut violations = Vec::new();
    let arenas: HashMap<&str, &Arena> = request.arenas.iter().map(|a| (a.id.as_str(), a)).collect();
    let competitors: HashMap<&str, _> = request
        .competitors
        .iter()
        .map(|c| (c.id.as_str(), c.required_labels()))
        .collect();

    let mut booked = HashSet::new();
    let mut running = HashSet::new();
    let mut run_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for entry in &output.schedule {
        *run_counts.entry(entry.competitor_id.as_str()).or_insert(0) += 1;

        if !booked.insert((&entry.date, &entry.start_time, &entry.arena_id)) {
            violations.push(Violation::new(
                ViolationType::DoubleBookedSlot,
                &entry.arena_id,
                format!(
                    "Arena '{}' booked twice at {} {}",
                    entry.arena_id, entry.date, entry.start_time
                ),
            ));
        }

        if !running.insert((&entry.competitor_id, &entry.date, &entry.start_time)) {
            violations.push(Violation::new(
                ViolationType::CompetitorOverlap,
                &entry.competitor_id,
                format!(
                    "Competitor '{}' runs twice at {} {}",
                    entry.competitor_id, entry.date, entry.start_time
                ),
            ));
        }

        if !entry.has_fixed_duration() {
            violations.push(Violation::new(
                ViolationType::DurationMismatch,
                &entry.competitor_id,
                format!(
                    "Run {}-{} is not 30 minutes long",
                    entry.start_time, entry.end_time
                ),
            ));
        }

        match arenas.get(entry.arena_id.as_str()) {
            None => violations.push(Violation::new(
                ViolationType::UnknownArena,
                &entry.arena_id,
                format!("Unknown arena '{}'", entry.arena_id),
            )),
            Some(arena) => {
                let fits = competitors
                    .get(entry.competitor_id.as_str())
                    .is_some_and(|labels| labels.iter().any(|&l| arena.accepts(l)));
                if !fits {
                    violations.push(Violation::new(
                        ViolationType::SpecialtyMismatch,
                        &entry.competitor_id,
                        format!(
                            "Arena '{}' ({}) fits no run of competitor '{}'",
                            arena.id, arena.specialty_type, entry.competitor_id
                        ),
                    ));
                }
            }
        }
    }

    if output.is_complete() {
        for c in &request.competitors {
            let expected = c.required_labels().len();
            let actual = run_counts.get(c.id.as_str()).copied().unwrap_or(0);
            if expected != actual {
                violations.push(Violation::new(
                    ViolationType::RunCountMismatch,
                    &c.id,
                    format!(
                        "Competitor '{}' has {actual} runs, expected {expected}",
                        c.id
                    ),
                ));
            }
        }
    }

    violations
}
