//! CP formulation of trial scheduling.
//!
//! Each required run is a variable whose domain is the set of compatible
//! slots. Constraints:
//! - `AllDifferent` over slots (an arena slot hosts one run)
//! - per competitor, no two runs share a `(date, start)` pair
//!
//! The model is solved by depth-first backtracking with a
//! most-constrained-variable (MRV) ordering. When no complete assignment
//! exists, a greedy pass explains which runs could not be placed.
//!
//! # Reference
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

mod diagnostics;
mod search;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::models::{RequiredRun, ScheduleEntry, ScheduleOutput, Slot, UnplacedReason, UnplacedRun};

pub use search::SearchStats;

/// Builds a CP model from required runs and a slot catalog.
///
/// # Example
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use trial_schedule::cp::TrialCpBuilder;
/// use trial_schedule::models::{build_slot_catalog, derive_required_runs, Arena, Competitor};
///
/// let days = vec![NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()];
/// let times = vec![NaiveTime::from_hms_opt(9, 0, 0).unwrap()];
/// let slots = build_slot_catalog(&days, &times, &[Arena::any("A1")]);
/// let runs = derive_required_runs(&[Competitor::new("C1")]);
///
/// let (output, solution) = TrialCpBuilder::new(&runs, &slots).solve();
/// assert!(solution.is_solution_found());
/// assert_eq!(output.schedule[0].arena_id, "A1");
/// ```
pub struct TrialCpBuilder<'a> {
    runs: &'a [RequiredRun],
    slots: &'a [Slot],
}

/// A built model: runs, slots, per-run domains and the search order.
#[derive(Debug, Clone)]
pub struct CpModel<'a> {
    runs: &'a [RequiredRun],
    slots: &'a [Slot],
    domains: Vec<Vec<usize>>,
    order: Vec<usize>,
}

/// Outcome of solving a [`CpModel`].
///
/// Run and slot references are indices into the model's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpSolution {
    /// Every run placed; `slot_for_run[i]` is the slot of run `i`.
    Solved {
        /// Slot index per run index.
        slot_for_run: Vec<usize>,
        /// Search effort.
        stats: SearchStats,
    },
    /// Some runs have no compatible slot at all; search never ran.
    NoCompatibleSlots {
        /// Runs with an empty domain, in derivation order.
        runs: Vec<usize>,
    },
    /// Search exhausted without a complete assignment.
    Exhausted {
        /// Runs blamed by the diagnostic pass, in search order.
        unplaced: Vec<(usize, UnplacedReason)>,
        /// Search effort.
        stats: SearchStats,
    },
}

impl<'a> TrialCpBuilder<'a> {
    /// Creates a new builder.
    pub fn new(runs: &'a [RequiredRun], slots: &'a [Slot]) -> Self {
        Self { runs, slots }
    }

    /// Builds the model.
    ///
    /// Domains list compatible slots in candidate order (date, start,
    /// arena id). The search order is a stable sort of runs by domain size.
    pub fn build(&self) -> CpModel<'a> {
        let mut by_candidate: Vec<usize> = (0..self.slots.len()).collect();
        by_candidate.sort_by(|&a, &b| self.slots[a].candidate_cmp(&self.slots[b]));

        let domains: Vec<Vec<usize>> = self
            .runs
            .iter()
            .map(|run| {
                by_candidate
                    .iter()
                    .copied()
                    .filter(|&s| run.specialty.is_compatible_with(self.slots[s].specialty))
                    .collect()
            })
            .collect();

        let mut order: Vec<usize> = (0..self.runs.len()).collect();
        order.sort_by_key(|&r| domains[r].len());

        CpModel {
            runs: self.runs,
            slots: self.slots,
            domains,
            order,
        }
    }

    /// Builds, solves and decodes into a [`ScheduleOutput`].
    pub fn solve(&self) -> (ScheduleOutput, CpSolution) {
        let model = self.build();
        let solution = model.solve();
        let output = model.decode(&solution);
        (output, solution)
    }
}

impl<'a> CpModel<'a> {
    /// Number of variables (required runs).
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Compatible slot indices for a run, in candidate order.
    pub fn domain(&self, run: usize) -> &[usize] {
        &self.domains[run]
    }

    /// Run indices in search order (smallest domain first).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Runs whose domain is empty, in derivation order.
    pub fn empty_domain_runs(&self) -> Vec<usize> {
        (0..self.runs.len())
            .filter(|&r| self.domains[r].is_empty())
            .collect()
    }

    /// Matching bound showing no complete assignment can exist.
    ///
    /// Each constraint is relaxed on its own into a bipartite matching:
    /// runs to slots (ignoring competitor start times), and per competitor,
    /// runs to distinct start times (ignoring other competitors). If either
    /// matching can't cover every run, the full problem is infeasible.
    pub fn is_trivially_infeasible(&self) -> bool {
        if matching_size(&self.domains, self.slots.len()) < self.runs.len() {
            return true;
        }

        let mut per_competitor: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, run) in self.runs.iter().enumerate() {
            per_competitor
                .entry(run.competitor_id.as_str())
                .or_default()
                .push(i);
        }

        per_competitor.values().any(|runs| {
            let mut start_index = BTreeMap::new();
            let adjacency: Vec<Vec<usize>> = runs
                .iter()
                .map(|&r| {
                    let starts: BTreeSet<usize> = self.domains[r]
                        .iter()
                        .map(|&s| {
                            let next = start_index.len();
                            *start_index
                                .entry((self.slots[s].date, self.slots[s].start))
                                .or_insert(next)
                        })
                        .collect();
                    starts.into_iter().collect()
                })
                .collect();
            matching_size(&adjacency, start_index.len()) < runs.len()
        })
    }

    /// Solves the model.
    pub fn solve(&self) -> CpSolution {
        let empty = self.empty_domain_runs();
        if !empty.is_empty() {
            warn!(
                runs = empty.len(),
                "required runs have no compatible slot, skipping search"
            );
            return CpSolution::NoCompatibleSlots { runs: empty };
        }

        if self.is_trivially_infeasible() {
            debug!("slot capacity below demand, skipping search");
            return CpSolution::Exhausted {
                unplaced: diagnostics::explain_failure(self),
                stats: SearchStats::default(),
            };
        }

        let (assignment, stats) = search::backtrack(self);
        debug!(
            nodes = stats.nodes,
            backtracks = stats.backtracks,
            pruned = stats.pruned,
            found = assignment.is_some(),
            "backtracking search finished"
        );

        match assignment {
            Some(slot_for_run) => CpSolution::Solved {
                slot_for_run,
                stats,
            },
            None => CpSolution::Exhausted {
                unplaced: diagnostics::explain_failure(self),
                stats,
            },
        }
    }

    /// Decodes a solution into a [`ScheduleOutput`].
    ///
    /// Entries follow run derivation order.
    pub fn decode(&self, solution: &CpSolution) -> ScheduleOutput {
        match solution {
            CpSolution::Solved { slot_for_run, .. } => ScheduleOutput::complete(
                self.runs
                    .iter()
                    .zip(slot_for_run)
                    .map(|(run, &s)| ScheduleEntry::from_slot(run.competitor_id.as_str(), &self.slots[s]))
                    .collect(),
            ),
            CpSolution::NoCompatibleSlots { runs } => ScheduleOutput::infeasible(
                self.runs.len(),
                runs.iter()
                    .map(|&r| self.unplaced(r, UnplacedReason::NoCompatibleSlots))
                    .collect(),
            ),
            CpSolution::Exhausted { unplaced, .. } => ScheduleOutput::infeasible(
                self.runs.len(),
                unplaced
                    .iter()
                    .map(|&(r, reason)| self.unplaced(r, reason))
                    .collect(),
            ),
        }
    }

    fn unplaced(&self, run: usize, reason: UnplacedReason) -> UnplacedRun {
        let run = &self.runs[run];
        UnplacedRun::new(run.competitor_id.as_str(), run.specialty, reason)
    }
}

/// Size of a maximum bipartite matching (Kuhn's augmenting paths).
///
/// `adjacency[l]` lists the right-hand vertices left vertex `l` may take.
fn matching_size(adjacency: &[Vec<usize>], right_len: usize) -> usize {
    let mut owner: Vec<Option<usize>> = vec![None; right_len];
    let mut size = 0;
    for left in 0..adjacency.len() {
        let mut visited = vec![false; right_len];
        if augment(left, adjacency, &mut owner, &mut visited) {
            size += 1;
        }
    }
    size
}

fn augment(
    left: usize,
    adjacency: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &right in &adjacency[left] {
        if visited[right] {
            continue;
        }
        visited[right] = true;
        let free = match owner[right] {
            None => true,
            Some(other) => augment(other, adjacency, owner, visited),
        };
        if free {
            owner[right] = Some(left);
            return true;
        }
    }
    false
}

impl CpSolution {
    /// Whether a complete assignment was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// Search statistics (zero when search was skipped).
    pub fn stats(&self) -> SearchStats {
        match self {
            Self::Solved { stats, .. } | Self::Exhausted { stats, .. } => *stats,
            Self::NoCompatibleSlots { .. } => SearchStats::default(),
        }
    }
}
