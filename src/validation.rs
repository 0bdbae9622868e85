//! Input validation for schedule requests.
//!
//! Checks structural integrity of a request before any slot is built.
//! Detects:
//! - Empty competitor, arena, day or time lists
//! - Malformed event days (`YYYY-MM-DD`) and time slots (`HH:mm`)
//! - Duplicate or blank IDs, duplicate days and times
//! - Competitors declaring the same specialty twice
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{parse_event_day, parse_time_of_day};
use crate::scheduler::ScheduleRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required list is empty.
    EmptyInput,
    /// An event day isn't a real `YYYY-MM-DD` date.
    InvalidDate,
    /// A time slot isn't a valid `HH:mm` time.
    InvalidTime,
    /// Two entities (or days, or times) share the same value.
    DuplicateId,
    /// A competitor or arena has a blank ID.
    EmptyId,
    /// A competitor declares the same specialty twice.
    DuplicateSpecialty,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule request.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    for (list, len) in [
        ("competitors", request.competitors.len()),
        ("arenas", request.arenas.len()),
        ("eventDays", request.event_days.len()),
        ("timeSlots", request.time_slots.len()),
    ] {
        if len == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInput,
                format!("'{list}' must not be empty"),
            ));
        }
    }

    let mut competitor_ids = HashSet::new();
    for c in &request.competitors {
        if c.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Competitor with blank ID",
            ));
        } else if !competitor_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate competitor ID: {}", c.id),
            ));
        }

        let mut seen = HashSet::new();
        for s in &c.specialties {
            if !seen.insert(s.label()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSpecialty,
                    format!("Competitor '{}' declares {} more than once", c.id, s.label()),
                ));
            }
        }
    }

    let mut arena_ids = HashSet::new();
    for a in &request.arenas {
        if a.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Arena with blank ID",
            ));
        } else if !arena_ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate arena ID: {}", a.id),
            ));
        }
    }

    let mut days = HashSet::new();
    for d in &request.event_days {
        match parse_event_day(d) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDate,
                format!("Event day '{d}' is not a valid YYYY-MM-DD date"),
            )),
            Some(day) if !days.insert(day) => errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event day: {d}"),
            )),
            Some(_) => {}
        }
    }

    let mut times = HashSet::new();
    for t in &request.time_slots {
        match parse_time_of_day(t) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTime,
                format!("Time slot '{t}' is not a valid HH:mm time"),
            )),
            Some(time) if !times.insert(time) => errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate time slot: {t}"),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
