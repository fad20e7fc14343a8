use serde::{Deserialize, Serialize};

/// Oxygen saturation (percent) below which a patient is flagged for review.
pub const HYPOXEMIA_THRESHOLD: i32 = 90;

/// Phrases whose presence in the narrative excludes the patient.
pub const HIGH_RISK_PHRASES: [&str; 2] = ["high fall risk", "requires iv vasopressors"];

/// Phrases that must all be present for a positive recommendation.
pub const HOME_READINESS_PHRASES: [&str; 2] = ["caregiver present", "managing care remotely"];

/// The rule that decided a verdict, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    IcuStay,
    Hypoxemia,
    HighRiskNarrative,
    HomeReadiness,
    NoSignal,
}

impl EligibilityRule {
    pub fn description(&self) -> &'static str {
        match self {
            Self::IcuStay => "ICU-level stay",
            Self::Hypoxemia => "O2 saturation below 90%",
            Self::HighRiskNarrative => "high-risk phrase in assessment",
            Self::HomeReadiness => "caregiver present and remote-care confidence",
            Self::NoSignal => "no decisive signal",
        }
    }
}

// Callers pass text that is already lowercased. No word-boundary check:
// a longer word containing the phrase still matches.

pub(crate) fn has_high_risk_phrase(lower: &str) -> bool {
    HIGH_RISK_PHRASES.iter().any(|p| lower.contains(p))
}

pub(crate) fn has_home_readiness(lower: &str) -> bool {
    HOME_READINESS_PHRASES.iter().all(|p| lower.contains(p))
}
