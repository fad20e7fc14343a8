//! Analyzers that run without a model.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AnalyzerError, NarrativeAnalyzer};
use crate::models::NarrativeAssessment;

/// Uses the raw notes themselves as the assessment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughAnalyzer;

impl NarrativeAnalyzer for PassthroughAnalyzer {
    async fn analyze(&self, raw_notes: &str) -> Result<NarrativeAssessment, AnalyzerError> {
        Ok(NarrativeAssessment::new(raw_notes.trim()))
    }
}

/// Mock analyzer for testing — returns a configurable response.
///
/// Can be told to fail a number of times first, and counts calls.
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    response: String,
    failures_before_success: usize,
    failure: Option<fn() -> AnalyzerError>,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Self::default()
        }
    }

    /// Fail the first `n` calls, with a retryable connection error unless
    /// [`MockAnalyzer::failing_with`] picks another.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.failures_before_success = n;
        self
    }

    /// Error returned by failing calls.
    pub fn failing_with(mut self, failure: fn() -> AnalyzerError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Fail every call.
    pub fn always_failing() -> Self {
        Self::new("").failing_first(usize::MAX)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NarrativeAnalyzer for MockAnalyzer {
    async fn analyze(&self, _raw_notes: &str) -> Result<NarrativeAssessment, AnalyzerError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures_before_success {
            return Err(match self.failure {
                Some(failure) => failure(),
                None => AnalyzerError::Connection("mock".into()),
            });
        }
        Ok(NarrativeAssessment::new(self.response.as_str()))
    }
}
