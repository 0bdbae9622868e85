//! Trial scheduler, schedule audit and KPI evaluation.
//!
//! # Algorithm
//!
//! `TrialScheduler` validates a request, builds the slot catalog, derives
//! required runs and solves the CP model by backtracking. Placement is
//! all-or-nothing: a request either gets a complete schedule or an empty
//! one with diagnostics.
//!
//! # Audit
//!
//! `audit_schedule` independently re-checks hard constraints on any
//! schedule output.
//!
//! # KPI
//!
//! `ScheduleKpi` computes placement rate and slot/arena utilization.

mod audit;
mod kpi;
mod trial;

pub use audit::audit_schedule;
pub use kpi::ScheduleKpi;
pub use trial::{ScheduleRequest, TrialScheduler};
