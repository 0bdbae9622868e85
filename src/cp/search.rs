//! Depth-first backtracking search.
//!
//! # Algorithm
//! Runs are visited in MRV order. At each depth the next untried domain
//! slot that is free and doesn't clash with the competitor's other runs is
//! claimed. After a claim, forward checking verifies every later run still
//! has at least one usable slot; if not, the claim is undone immediately.
//! A depth with no candidates left unwinds to the previous depth, which
//! releases its slot and resumes from its next candidate.
//!
//! The search keeps an explicit stack of candidate cursors, so deep
//! instances don't grow the call stack.
//!
//! # Complexity
//! Worst case exponential in the number of runs; the search space is
//! finite, so the search always terminates.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};

use super::CpModel;

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Successful claims (search tree nodes entered).
    pub nodes: u64,
    /// Times a depth ran out of candidates and unwound.
    pub backtracks: u64,
    /// Claims undone by forward checking.
    pub pruned: u64,
}

/// Claimed slots and competitor start times for a partial assignment.
struct SearchState<'m> {
    slot_taken: Vec<bool>,
    busy: HashSet<(&'m str, NaiveDate, NaiveTime)>,
    slot_for_run: Vec<Option<usize>>,
}

impl<'m> SearchState<'m> {
    fn new(model: &CpModel<'m>) -> Self {
        Self {
            slot_taken: vec![false; model.slots.len()],
            busy: HashSet::new(),
            slot_for_run: vec![None; model.runs.len()],
        }
    }

    fn can_place(&self, model: &CpModel<'m>, run: usize, slot: usize) -> bool {
        if self.slot_taken[slot] {
            return false;
        }
        let s = &model.slots[slot];
        !self
            .busy
            .contains(&(model.runs[run].competitor_id.as_str(), s.date, s.start))
    }

    fn claim(&mut self, model: &CpModel<'m>, run: usize, slot: usize) {
        let s = &model.slots[slot];
        self.slot_taken[slot] = true;
        self.busy
            .insert((model.runs[run].competitor_id.as_str(), s.date, s.start));
        self.slot_for_run[run] = Some(slot);
    }

    fn release(&mut self, model: &CpModel<'m>, run: usize) {
        if let Some(slot) = self.slot_for_run[run].take() {
            let s = &model.slots[slot];
            self.slot_taken[slot] = false;
            self.busy
                .remove(&(model.runs[run].competitor_id.as_str(), s.date, s.start));
        }
    }

    /// Whether every run after `depth` in search order still has a usable slot.
    fn forward_check(&self, model: &CpModel<'m>, depth: usize) -> bool {
        model.order[depth + 1..].iter().all(|&run| {
            model.domains[run]
                .iter()
                .any(|&slot| self.can_place(model, run, slot))
        })
    }
}

/// Searches for a complete assignment.
///
/// Returns the slot index per run index, or `None` if no complete
/// assignment exists.
pub(super) fn backtrack(model: &CpModel<'_>) -> (Option<Vec<usize>>, SearchStats) {
    let n = model.order.len();
    let mut stats = SearchStats::default();
    let mut state = SearchState::new(model);
    let mut cursor = vec![0usize; n];
    let mut depth = 0;

    while depth < n {
        let run = model.order[depth];
        let domain = &model.domains[run];
        let mut placed = false;

        while cursor[depth] < domain.len() {
            let slot = domain[cursor[depth]];
            cursor[depth] += 1;
            if !state.can_place(model, run, slot) {
                continue;
            }
            state.claim(model, run, slot);
            stats.nodes += 1;
            if state.forward_check(model, depth) {
                placed = true;
                break;
            }
            state.release(model, run);
            stats.pruned += 1;
        }

        if placed {
            depth += 1;
            if depth < n {
                cursor[depth] = 0;
            }
            continue;
        }

        cursor[depth] = 0;
        if depth == 0 {
            return (None, stats);
        }
        depth -= 1;
        stats.backtracks += 1;
        state.release(model, model.order[depth]);
    }

    // Every run was claimed on the way down to depth n.
    let assignment = state.slot_for_run.into_iter().collect::<Option<Vec<_>>>();
    (assignment, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::TrialCpBuilder;
    use crate::models::{
        build_slot_catalog, derive_required_runs, parse_event_day, parse_time_of_day, Arena,
        Competitor, DetectionType,
    };

    fn slots(times: &[&str], arenas: &[Arena]) -> Vec<crate::models::Slot> {
        let days = vec![parse_event_day("2025-05-01").unwrap()];
        let times: Vec<_> = times.iter().map(|t| parse_time_of_day(t).unwrap()).collect();
        build_slot_catalog(&days, &times, arenas)
    }

    #[test]
    fn test_backtrack_finds_assignment() {
        let slots = slots(&["09:00", "09:30"], &[Arena::any("A")]);
        let runs = derive_required_runs(&[Competitor::new("C1"), Competitor::new("C2")]);
        let model = TrialCpBuilder::new(&runs, &slots).build();

        let (assignment, stats) = backtrack(&model);
        assert_eq!(assignment, Some(vec![0, 1]));
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.backtracks, 0);
    }

    #[test]
    fn test_backtrack_exhausts_when_overbooked() {
        let slots = slots(&["09:00", "09:30"], &[Arena::any("A")]);
        let runs = derive_required_runs(&[
            Competitor::new("C1"),
            Competitor::new("C2"),
            Competitor::new("C3"),
        ]);
        let model = TrialCpBuilder::new(&runs, &slots).build();

        let (assignment, stats) = backtrack(&model);
        assert!(assignment.is_none());
        assert!(stats.pruned > 0);
    }

    #[test]
    fn test_backtrack_with_no_runs() {
        let slots = slots(&["09:00"], &[Arena::any("A")]);
        let model = TrialCpBuilder::new(&[], &slots).build();
        let (assignment, stats) = backtrack(&model);
        assert_eq!(assignment, Some(Vec::new()));
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_state_claim_release_symmetry() {
        let slots = slots(
            &["09:00"],
            &[Arena::bite_work("B"), Arena::detection("N", DetectionType::Narcotics)],
        );
        let runs = derive_required_runs(&[Competitor::new("C1")
            .with_bite_work()
            .with_detection(DetectionType::Narcotics)]);
        let model = TrialCpBuilder::new(&runs, &slots).build();
        let mut state = SearchState::new(&model);

        assert!(state.can_place(&model, 1, 1));
        state.claim(&model, 0, 0);
        assert!(!state.can_place(&model, 0, 0));
        // Same competitor, same start time in another arena
        assert!(!state.can_place(&model, 1, 1));

        state.release(&model, 0);
        assert!(state.can_place(&model, 0, 0));
        assert!(state.can_place(&model, 1, 1));
        assert!(state.busy.is_empty());
    }
}
