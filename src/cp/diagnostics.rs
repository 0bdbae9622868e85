//! Failure explanation for infeasible models.
//!
//! A single greedy pass in search order claims each run's first free
//! domain slot, ignoring competitor start-time clashes. Runs left without
//! a slot are blamed on slot contention. If the pass places everything,
//! the clash must be a competitor running twice at once, so runs whose
//! greedy slot repeats an earlier start time of the same competitor are
//! blamed instead.
//!
//! The result is a human-readable hint, not a minimal conflict set.

use std::collections::HashSet;

use super::CpModel;
use crate::models::UnplacedReason;

pub(super) fn explain_failure(model: &CpModel<'_>) -> Vec<(usize, UnplacedReason)> {
    let mut taken = vec![false; model.slots.len()];
    let mut greedy: Vec<Option<usize>> = vec![None; model.runs.len()];
    let mut unplaced = Vec::new();

    for &run in &model.order {
        match model.domains[run].iter().copied().find(|&s| !taken[s]) {
            Some(slot) => {
                taken[slot] = true;
                greedy[run] = Some(slot);
            }
            None => unplaced.push((run, UnplacedReason::SlotsTaken)),
        }
    }

    if !unplaced.is_empty() {
        return unplaced;
    }

    let mut starts = HashSet::new();
    for &run in &model.order {
        if let Some(slot) = greedy[run] {
            let s = &model.slots[slot];
            if !starts.insert((model.runs[run].competitor_id.as_str(), s.date, s.start)) {
                unplaced.push((run, UnplacedReason::CompetitorOverlap));
            }
        }
    }
    unplaced
}
