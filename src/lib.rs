//! Arena scheduling for multi-day K9 trials.
//!
//! Assigns every required competitor run to a distinct, compatible,
//! conflict-free arena time slot, or explains which runs could not be
//! placed. Placement is all-or-nothing and fully deterministic.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Competitor`, `Arena`, `Specialty`,
//!   `SpecialtyLabel`, `Slot`, `RequiredRun`, `ScheduleOutput`
//! - **`cp`**: CSP formulation — domains, MRV ordering, backtracking search,
//!   failure diagnostics
//! - **`scheduler`**: `TrialScheduler` entry point, schedule audit, KPIs
//! - **`validation`**: Request integrity checks (formats, duplicates, empty lists)
//! - **`generator`**: Reproducible random requests
//! - **`config`** / **`logger`**: CLI configuration and tracing setup
//!
//! # Example
//!
//! ```
//! use trial_schedule::models::{Arena, Competitor, DetectionType};
//! use trial_schedule::scheduler::{ScheduleRequest, TrialScheduler};
//!
//! let request = ScheduleRequest::new(
//!     vec![Competitor::new("C1").with_bite_work().with_detection(DetectionType::Narcotics)],
//!     vec![Arena::bite_work("BW"), Arena::detection("NA", DetectionType::Narcotics)],
//! )
//! .with_event_days(["2025-05-01"])
//! .with_time_slots(["09:00", "09:30"]);
//!
//! let output = TrialScheduler::new().schedule(&request).unwrap();
//! assert_eq!(output.diagnostics.placed_runs, 2);
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

pub mod config;
pub mod cp;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
