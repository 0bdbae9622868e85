//! Trial scheduling domain models.
//!
//! Provides the input types (competitors, arenas, specialties), the
//! transient values derived per solve (required runs, slots) and the
//! solver output.
//!
//! # Domain Mappings
//!
//! | trial-schedule | Generic scheduling |
//! |----------------|--------------------|
//! | Competitor | Job |
//! | RequiredRun | Operation |
//! | Arena | Machine |
//! | Slot | Machine time bucket |
//! | ScheduleOutput | Schedule + infeasibility report |

mod arena;
mod competitor;
mod run;
mod schedule;
mod slot;
mod specialty;

pub use arena::Arena;
pub use competitor::Competitor;
pub use run::{derive_required_runs, RequiredRun};
pub use schedule::{
    Diagnostics, ScheduleEntry, ScheduleOutput, UnplacedReason, UnplacedRun, Violation,
    ViolationType,
};
pub use slot::{
    build_slot_catalog, parse_event_day, parse_time_of_day, slot_end, Slot, DATE_FORMAT,
    SLOT_DURATION_MINUTES, TIME_FORMAT,
};
pub use specialty::{DetectionType, ParseLabelError, Specialty, SpecialtyLabel};
