//! Arena model.
//!
//! Arenas are the physical resources runs are booked into. Each arena
//! hosts a single specialty label for the whole trial.

use serde::{Deserialize, Serialize};

use super::{DetectionType, SpecialtyLabel};

/// A trial arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    /// Unique arena identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Specialty label the arena is set up for.
    pub specialty_type: SpecialtyLabel,
}

impl Arena {
    /// Creates an arena with the given label.
    pub fn new(id: impl Into<String>, specialty_type: SpecialtyLabel) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            specialty_type,
        }
    }

    /// Creates a general-purpose (`Any`) arena.
    pub fn any(id: impl Into<String>) -> Self {
        Self::new(id, SpecialtyLabel::Any)
    }

    /// Creates a bite work arena.
    pub fn bite_work(id: impl Into<String>) -> Self {
        Self::new(id, SpecialtyLabel::BiteWork)
    }

    /// Creates a detection arena.
    pub fn detection(id: impl Into<String>, detection_type: DetectionType) -> Self {
        Self::new(id, SpecialtyLabel::Detection(detection_type))
    }

    /// Sets the arena name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether a run with the given label may be held here.
    pub fn accepts(&self, run: SpecialtyLabel) -> bool {
        run.is_compatible_with(self.specialty_type)
    }
}
