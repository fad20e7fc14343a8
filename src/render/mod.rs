//! Presentation sinks for a finished ranking.

pub mod json;
pub mod table;

pub use json::*;
pub use table::*;

use std::io::Write;

use thiserror::Error;

use crate::ranking::RankingReport;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes an ordered ranking somewhere a person can read it.
pub trait PresentationSink {
    fn render(&self, report: &RankingReport, out: &mut dyn Write) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn sink(&self) -> Box<dyn PresentationSink> {
        match self {
            Self::Table => Box::new(TableSink),
            Self::Json => Box::new(JsonSink),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use uuid::Uuid;

    use crate::eligibility::{EligibilityDecision, EligibilityRule};
    use crate::models::{EligibilityVerdict, PatientRecord, PriorityLabel};
    use crate::ranking::{FallbackFlags, LabelTally, RankingReport, RankingRow};

    pub fn report() -> RankingReport {
        let rows = vec![
            RankingRow::project(
                &PatientRecord::fallback("PT-001"),
                EligibilityDecision {
                    rule: EligibilityRule::HomeReadiness,
                    verdict: EligibilityVerdict::new(PriorityLabel::Eligible),
                },
                FallbackFlags::default(),
            ),
            RankingRow::project(
                &PatientRecord {
                    icu_stay: true,
                    caregiver_available: false,
                    ..PatientRecord::fallback("PT-002")
                },
                EligibilityDecision {
                    rule: EligibilityRule::IcuStay,
                    verdict: EligibilityVerdict::new(PriorityLabel::Ineligible),
                },
                FallbackFlags {
                    record: true,
                    narrative: false,
                },
            ),
        ];
        RankingReport {
            run_id: Uuid::nil(),
            generated_at: "2026-01-01T00:00:00+00:00".into(),
            tally: LabelTally::from_rows(&rows),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_table() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn each_format_renders() {
        let report = fixtures::report();
        for format in [OutputFormat::Table, OutputFormat::Json] {
            let mut out = Vec::new();
            format.sink().render(&report, &mut out).unwrap();
            assert!(!out.is_empty());
        }
    }
}
