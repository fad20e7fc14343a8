use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::eligibility::{EligibilityDecision, EligibilityRule};
use crate::models::{PatientRecord, PriorityLabel};

/// Which collaborator results were replaced by fallbacks for a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackFlags {
    /// Record source failed; the placeholder record was used.
    pub record: bool,
    /// Notes or analysis failed; an empty assessment was used.
    pub narrative: bool,
}

impl FallbackFlags {
    pub fn any(&self) -> bool {
        self.record || self.narrative
    }
}

/// Read-only projection of one patient for ordering and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
    pub patient_id: String,
    pub age: i32,
    pub diagnosis: String,
    pub ed_visits: u32,
    pub o2_sat: i32,
    pub caregiver_available: bool,
    pub telehealth_history: bool,
    pub internet_access: bool,
    pub priority: PriorityLabel,
    pub priority_score: u8,
    pub rule: EligibilityRule,
    pub fallbacks: FallbackFlags,
}

impl RankingRow {
    pub fn project(
        record: &PatientRecord,
        decision: EligibilityDecision,
        fallbacks: FallbackFlags,
    ) -> Self {
        Self {
            patient_id: record.patient_id.clone(),
            age: record.age,
            diagnosis: record.diagnosis.clone(),
            ed_visits: record.ed_visits,
            o2_sat: record.o2_sat,
            caregiver_available: record.caregiver_available,
            telehealth_history: record.telehealth_history,
            internet_access: record.internet_access,
            priority: decision.verdict.label(),
            priority_score: decision.verdict.score(),
            rule: decision.rule,
            fallbacks,
        }
    }
}

/// Count of rows per priority label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTally {
    pub eligible: usize,
    pub needs_review: usize,
    pub ineligible: usize,
}

impl LabelTally {
    pub fn from_rows(rows: &[RankingRow]) -> Self {
        rows.iter().fold(Self::default(), |mut tally, row| {
            match row.priority {
                PriorityLabel::Eligible => tally.eligible += 1,
                PriorityLabel::NeedsReview => tally.needs_review += 1,
                PriorityLabel::Ineligible => tally.ineligible += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.eligible + self.needs_review + self.ineligible
    }
}

/// Result of one ranking pass, rows ordered by priority score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub run_id: Uuid,
    pub generated_at: String,
    pub rows: Vec<RankingRow>,
    pub tally: LabelTally,
}
