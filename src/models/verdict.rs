use serde::{Deserialize, Serialize};

use super::enums::PriorityLabel;

/// Outcome of eligibility classification.
///
/// Only constructible from a label, so the score always agrees with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VerdictRepr", into = "VerdictRepr")]
pub struct EligibilityVerdict {
    label: PriorityLabel,
}

impl EligibilityVerdict {
    pub const fn new(label: PriorityLabel) -> Self {
        Self { label }
    }

    pub fn label(&self) -> PriorityLabel {
        self.label
    }

    pub fn score(&self) -> u8 {
        self.label.score()
    }
}

impl From<PriorityLabel> for EligibilityVerdict {
    fn from(label: PriorityLabel) -> Self {
        Self::new(label)
    }
}

/// Wire shape: both label and score, score derived on the way in.
#[derive(Serialize, Deserialize)]
struct VerdictRepr {
    label: PriorityLabel,
    #[serde(default)]
    score: u8,
}

impl From<VerdictRepr> for EligibilityVerdict {
    fn from(repr: VerdictRepr) -> Self {
        Self::new(repr.label)
    }
}

impl From<EligibilityVerdict> for VerdictRepr {
    fn from(verdict: EligibilityVerdict) -> Self {
        Self {
            label: verdict.label,
            score: verdict.score(),
        }
    }
}
