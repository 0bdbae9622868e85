//! Required runs.
//!
//! A required run is one mandatory session a competitor must complete for
//! one declared specialty. Runs are derived fresh for every solve and never
//! stored.

use super::{Competitor, SpecialtyLabel};

/// One (competitor, specialty) pair that needs a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRun {
    /// Owning competitor.
    pub competitor_id: String,
    /// Label the hosting arena must be compatible with.
    pub specialty: SpecialtyLabel,
}

impl RequiredRun {
    /// Creates a required run.
    pub fn new(competitor_id: impl Into<String>, specialty: SpecialtyLabel) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            specialty,
        }
    }
}

/// Derives the required runs for all competitors.
///
/// Order: competitors in input order, then specialties in declaration
/// order. Competitors with no specialties yield a single `Any` run.
pub fn derive_required_runs(competitors: &[Competitor]) -> Vec<RequiredRun> {
    competitors
        .iter()
        .flat_map(|c| {
            c.required_labels()
                .into_iter()
                .map(move |label| RequiredRun::new(c.id.as_str(), label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetectionType;

    #[test]
    fn test_derive_runs_order() {
        let competitors = vec![
            Competitor::new("C1")
                .with_bite_work()
                .with_detection(DetectionType::Narcotics),
            Competitor::new("C2"),
            Competitor::new("C3").with_detection(DetectionType::Explosives),
        ];

        let runs = derive_required_runs(&competitors);
        assert_eq!(
            runs,
            vec![
                RequiredRun::new("C1", SpecialtyLabel::BiteWork),
                RequiredRun::new("C1", SpecialtyLabel::Detection(DetectionType::Narcotics)),
                RequiredRun::new("C2", SpecialtyLabel::Any),
                RequiredRun::new("C3", SpecialtyLabel::Detection(DetectionType::Explosives)),
            ]
        );
    }

    #[test]
    fn test_derive_runs_empty() {
        assert!(derive_required_runs(&[]).is_empty());
    }
}
