use std::cmp::Reverse;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{FallbackFlags, LabelTally, RankingReport, RankingRow};
use crate::analyzer::NarrativeAnalyzer;
use crate::config::RankerConfig;
use crate::eligibility::explain_eligibility;
use crate::models::{NarrativeAssessment, PatientRecord};
use crate::sources::{NotesSource, RecordSource};

/// Tuning for a ranking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOptions {
    /// Patients evaluated at once. Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Extra analyzer attempts after a retryable failure.
    pub analyzer_retries: u32,
    /// Wait before retry `n` is `n * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            analyzer_retries: 1,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl From<&RankerConfig> for RankingOptions {
    fn from(config: &RankerConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            analyzer_retries: config.analyzer.max_retries,
            ..Self::default()
        }
    }
}

/// Orchestrates one ranking pass:
/// fetch record → fetch notes → analyze → classify → order
pub struct RankingPipeline<R, N, A> {
    records: R,
    notes: N,
    analyzer: A,
    options: RankingOptions,
}

impl<R, N, A> RankingPipeline<R, N, A>
where
    R: RecordSource,
    N: NotesSource,
    A: NarrativeAnalyzer,
{
    pub fn new(records: R, notes: N, analyzer: A, options: RankingOptions) -> Self {
        Self {
            records,
            notes,
            analyzer,
            options,
        }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Rank the given patients. Never fails: collaborator errors become fallbacks.
    pub async fn rank(&self, patient_ids: &[String]) -> RankingReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("ranking_pass", %run_id, patients = patient_ids.len());

        async move {
            tracing::info!("Ranking pass started");

            let mut rows: Vec<RankingRow> = stream::iter(patient_ids)
                .map(|id| self.evaluate(id))
                .buffered(self.options.concurrency.max(1))
                .collect()
                .await;

            order_rows(&mut rows);
            let tally = LabelTally::from_rows(&rows);

            tracing::info!(
                eligible = tally.eligible,
                needs_review = tally.needs_review,
                ineligible = tally.ineligible,
                "Ranking pass finished"
            );

            RankingReport {
                run_id,
                generated_at: chrono::Utc::now().to_rfc3339(),
                rows,
                tally,
            }
        }
        .instrument(span)
        .await
    }

    /// Gather inputs for one patient and classify.
    pub async fn evaluate(&self, patient_id: &str) -> RankingRow {
        let mut fallbacks = FallbackFlags::default();

        let record = match self.records.fetch(patient_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(%patient_id, error = %e, "Record fetch failed, using fallback record");
                fallbacks.record = true;
                PatientRecord::fallback(patient_id)
            }
        };

        let narrative = match self.notes.fetch(patient_id).await {
            Ok(notes) if notes.trim().is_empty() => {
                tracing::debug!(%patient_id, "No clinical notes, skipping analysis");
                NarrativeAssessment::empty()
            }
            Ok(notes) => match self.analyze_with_retry(patient_id, &notes).await {
                Some(narrative) => narrative,
                None => {
                    fallbacks.narrative = true;
                    NarrativeAssessment::empty()
                }
            },
            Err(e) => {
                tracing::warn!(%patient_id, error = %e, "Notes fetch failed, using empty assessment");
                fallbacks.narrative = true;
                NarrativeAssessment::empty()
            }
        };

        let decision = explain_eligibility(&record, &narrative);

        tracing::info!(
            %patient_id,
            label = %decision.verdict.label(),
            score = decision.verdict.score(),
            rule = ?decision.rule,
            narrative_len = narrative.len(),
            "Patient classified"
        );

        RankingRow::project(&record, decision, fallbacks)
    }

    /// Call the analyzer, retrying retryable errors. `None` once attempts run out.
    async fn analyze_with_retry(&self, patient_id: &str, notes: &str) -> Option<NarrativeAssessment> {
        let max_retries = self.options.analyzer_retries;

        for attempt in 0..=max_retries {
            if attempt > 0 && !self.options.retry_backoff.is_zero() {
                tokio::time::sleep(self.options.retry_backoff * attempt).await;
            }

            match self.analyzer.analyze(notes).await {
                Ok(narrative) => return Some(narrative),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    tracing::warn!(
                        %patient_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Narrative analysis failed, retrying"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        %patient_id,
                        error = %e,
                        "Narrative analysis failed, using empty assessment"
                    );
                    return None;
                }
            }
        }

        None
    }
}

/// Split a comma-separated id list. Ids are trimmed, blanks dropped, order kept.
pub fn parse_patient_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Order rows by score descending. Stable: equal scores keep input order.
pub fn order_rows(rows: &mut [RankingRow]) {
    rows.sort_by_key(|row| Reverse(row.priority_score));
}
