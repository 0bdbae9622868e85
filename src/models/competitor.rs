//! Competitor model.
//!
//! A competitor is a handler/animal team entered in the trial. Display
//! fields are carried through untouched; only `id` and `specialties`
//! matter to scheduling.

use serde::{Deserialize, Serialize};

use super::{DetectionType, Specialty, SpecialtyLabel};

/// A team entered in the trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    /// Unique competitor identifier.
    pub id: String,
    /// Display name (usually the animal's name).
    #[serde(default)]
    pub name: String,
    /// Handler's name.
    #[serde(default)]
    pub handler_name: String,
    /// Agency the team represents.
    #[serde(default)]
    pub agency: String,
    /// Declared specialties. Empty = one run in an `Any` arena.
    #[serde(default)]
    pub specialties: Vec<Specialty>,
}

impl Competitor {
    /// Creates a competitor with no specialties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            handler_name: String::new(),
            agency: String::new(),
            specialties: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the handler's name.
    pub fn with_handler(mut self, handler_name: impl Into<String>) -> Self {
        self.handler_name = handler_name.into();
        self
    }

    /// Sets the agency.
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = agency.into();
        self
    }

    /// Adds a specialty.
    pub fn with_specialty(mut self, specialty: Specialty) -> Self {
        self.specialties.push(specialty);
        self
    }

    /// Adds a bite work specialty.
    pub fn with_bite_work(self) -> Self {
        self.with_specialty(Specialty::BiteWork)
    }

    /// Adds a detection specialty.
    pub fn with_detection(self, detection_type: DetectionType) -> Self {
        self.with_specialty(Specialty::detection(detection_type))
    }

    /// Labels of the runs this competitor must complete, in declaration order.
    ///
    /// A competitor without specialties needs exactly one `Any` run.
    pub fn required_labels(&self) -> Vec<SpecialtyLabel> {
        if self.specialties.is_empty() {
            return vec![SpecialtyLabel::Any];
        }
        self.specialties.iter().map(Specialty::label).collect()
    }
}
