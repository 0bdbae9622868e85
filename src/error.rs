//! Crate error types.
//!
//! Infeasible schedules are not errors: they come back as a normal
//! [`ScheduleOutput`](crate::models::ScheduleOutput) with diagnostics.
//! Errors cover input that cannot be interpreted at all.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised before solving begins.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request failed one or more validation checks.
    #[error("invalid schedule request: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The request JSON doesn't match the expected shape.
    #[error("malformed request JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Validation problems, if this is a validation error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            Self::Parse(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
