use serde::{Deserialize, Serialize};

use super::rules::{has_high_risk_phrase, has_home_readiness, EligibilityRule, HYPOXEMIA_THRESHOLD};
use crate::models::{EligibilityVerdict, NarrativeAssessment, PatientRecord, PriorityLabel};

/// A verdict together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub rule: EligibilityRule,
    pub verdict: EligibilityVerdict,
}

/// Classify a patient for Hospital at Home.
///
/// Total over every input pair, including placeholder records and an empty
/// assessment.
pub fn classify_eligibility(
    record: &PatientRecord,
    narrative: &NarrativeAssessment,
) -> EligibilityVerdict {
    explain_eligibility(record, narrative).verdict
}

/// Evaluate the rules in order; the first match decides.
///
/// Structural checks run before the narrative is inspected at all.
pub fn explain_eligibility(
    record: &PatientRecord,
    narrative: &NarrativeAssessment,
) -> EligibilityDecision {
    if record.icu_stay {
        return decide(EligibilityRule::IcuStay, PriorityLabel::Ineligible);
    }

    if record.o2_sat < HYPOXEMIA_THRESHOLD {
        return decide(EligibilityRule::Hypoxemia, PriorityLabel::NeedsReview);
    }

    let lower = narrative.as_str().to_lowercase();

    if has_high_risk_phrase(&lower) {
        return decide(EligibilityRule::HighRiskNarrative, PriorityLabel::Ineligible);
    }

    if has_home_readiness(&lower) {
        return decide(EligibilityRule::HomeReadiness, PriorityLabel::Eligible);
    }

    decide(EligibilityRule::NoSignal, PriorityLabel::NeedsReview)
}

fn decide(rule: EligibilityRule, label: PriorityLabel) -> EligibilityDecision {
    EligibilityDecision {
        rule,
        verdict: EligibilityVerdict::new(label),
    }
}
