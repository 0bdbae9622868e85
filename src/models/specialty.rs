//! Specialty model and arena compatibility.
//!
//! A competitor trains in one or more specialties; an arena hosts exactly
//! one specialty label. Runs are matched to arenas through
//! [`SpecialtyLabel::is_compatible_with`].
//!
//! # Compatibility
//!
//! | Run label | Accepted by arena labels |
//! |-----------|--------------------------|
//! | `Any` | `Any` |
//! | `BiteWork` | `BiteWork`, `Any` |
//! | `Detection(k)` | `Detection(k)`, `Any` |
//!
//! The table is asymmetric: a run with no declared specialty only fits an
//! `Any` arena, while specialty runs may also use `Any` arenas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Detection sub-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionType {
    /// Narcotics detection.
    Narcotics,
    /// Explosives detection.
    Explosives,
}

/// A specialty declared by a competitor.
///
/// Serialized with a `type` tag:
/// `{"type": "BiteWork"}` or `{"type": "Detection", "detectionType": "Narcotics"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Specialty {
    /// Bite work (apprehension).
    BiteWork,
    /// Scent detection of the given kind.
    Detection {
        /// Detection sub-kind.
        #[serde(rename = "detectionType")]
        detection_type: DetectionType,
    },
}

/// Specialty category carried by a run or hosted by an arena.
///
/// Serialized as `"Any"`, `"BiteWork"`, `"Detection(Narcotics)"` or
/// `"Detection(Explosives)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpecialtyLabel {
    /// No particular specialty.
    Any,
    /// Bite work.
    BiteWork,
    /// Detection of the given kind.
    Detection(DetectionType),
}

/// Error returned when a specialty label string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown specialty label '{0}'")]
pub struct ParseLabelError(pub String);

impl Specialty {
    /// Bite work specialty.
    pub fn bite_work() -> Self {
        Self::BiteWork
    }

    /// Detection specialty of the given kind.
    pub fn detection(detection_type: DetectionType) -> Self {
        Self::Detection { detection_type }
    }

    /// The label a run for this specialty must satisfy.
    pub fn label(&self) -> SpecialtyLabel {
        match self {
            Self::BiteWork => SpecialtyLabel::BiteWork,
            Self::Detection { detection_type } => SpecialtyLabel::Detection(*detection_type),
        }
    }
}

impl SpecialtyLabel {
    /// Whether a run labelled `self` may be placed in an arena labelled `arena`.
    pub fn is_compatible_with(self, arena: SpecialtyLabel) -> bool {
        match self {
            Self::Any => arena == Self::Any,
            Self::BiteWork => matches!(arena, Self::BiteWork | Self::Any),
            Self::Detection(kind) => arena == Self::Detection(kind) || arena == Self::Any,
        }
    }
}

impl fmt::Display for DetectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narcotics => f.write_str("Narcotics"),
            Self::Explosives => f.write_str("Explosives"),
        }
    }
}

impl fmt::Display for SpecialtyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::BiteWork => f.write_str("BiteWork"),
            Self::Detection(kind) => write!(f, "Detection({kind})"),
        }
    }
}

impl FromStr for SpecialtyLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Any" => Ok(Self::Any),
            "BiteWork" => Ok(Self::BiteWork),
            "Detection(Narcotics)" => Ok(Self::Detection(DetectionType::Narcotics)),
            "Detection(Explosives)" => Ok(Self::Detection(DetectionType::Explosives)),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

impl TryFrom<String> for SpecialtyLabel {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpecialtyLabel> for String {
    fn from(label: SpecialtyLabel) -> Self {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARC: SpecialtyLabel = SpecialtyLabel::Detection(DetectionType::Narcotics);
    const EXPL: SpecialtyLabel = SpecialtyLabel::Detection(DetectionType::Explosives);

    #[test]
    fn test_any_run_only_fits_any_arena() {
        assert!(SpecialtyLabel::Any.is_compatible_with(SpecialtyLabel::Any));
        assert!(!SpecialtyLabel::Any.is_compatible_with(SpecialtyLabel::BiteWork));
        assert!(!SpecialtyLabel::Any.is_compatible_with(NARC));
        assert!(!SpecialtyLabel::Any.is_compatible_with(EXPL));
    }

    #[test]
    fn test_specialty_runs_fit_matching_or_any_arena() {
        assert!(SpecialtyLabel::BiteWork.is_compatible_with(SpecialtyLabel::BiteWork));
        assert!(SpecialtyLabel::BiteWork.is_compatible_with(SpecialtyLabel::Any));
        assert!(!SpecialtyLabel::BiteWork.is_compatible_with(NARC));

        assert!(NARC.is_compatible_with(NARC));
        assert!(NARC.is_compatible_with(SpecialtyLabel::Any));
        assert!(!NARC.is_compatible_with(EXPL));
        assert!(!NARC.is_compatible_with(SpecialtyLabel::BiteWork));
    }

    #[test]
    fn test_label_strings() {
        for (label, text) in [
            (SpecialtyLabel::Any, "Any"),
            (SpecialtyLabel::BiteWork, "BiteWork"),
            (NARC, "Detection(Narcotics)"),
            (EXPL, "Detection(Explosives)"),
        ] {
            assert_eq!(label.to_string(), text);
            assert_eq!(text.parse::<SpecialtyLabel>().unwrap(), label);
        }
        assert_eq!(
            "Detection".parse::<SpecialtyLabel>(),
            Err(ParseLabelError("Detection".into()))
        );
    }

    #[test]
    fn test_specialty_json_shape() {
        let s: Specialty =
            serde_json::from_str(r#"{"type":"Detection","detectionType":"Explosives"}"#).unwrap();
        assert_eq!(s, Specialty::detection(DetectionType::Explosives));
        assert_eq!(s.label(), EXPL);

        let b: Specialty = serde_json::from_str(r#"{"type":"BiteWork"}"#).unwrap();
        assert_eq!(b.label(), SpecialtyLabel::BiteWork);

        assert!(serde_json::from_str::<Specialty>(r#"{"type":"Detection"}"#).is_err());
    }

    #[test]
    fn test_label_json_is_plain_string() {
        assert_eq!(serde_json::to_string(&NARC).unwrap(), r#""Detection(Narcotics)""#);
        assert!(serde_json::from_str::<SpecialtyLabel>(r#""Tracking""#).is_err());
    }
}
