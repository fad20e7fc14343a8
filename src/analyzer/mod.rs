//! Narrative analyzer collaborators.
//!
//! Turn raw clinical notes into a short free-text eligibility assessment.
//! Output is opaque and may differ between calls with identical input.

pub mod offline;
pub mod ollama;
pub mod openai;
pub mod prompt;

pub use offline::*;
pub use ollama::*;
pub use openai::*;
pub use prompt::*;

use std::future::Future;

use thiserror::Error;

use crate::config::{AnalyzerConfig, ConfigError};
use crate::models::{AnalyzerBackend, NarrativeAssessment};

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer is not running at {0}")]
    Connection(String),

    #[error("Analyzer returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Analyzer returned no content")]
    EmptyResponse,
}

impl AnalyzerError {
    /// Whether a fresh attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) | Self::HttpClient(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::ResponseParsing(_) | Self::EmptyResponse => false,
        }
    }
}

/// Produces a narrative assessment from raw clinical notes.
pub trait NarrativeAnalyzer: Send + Sync {
    fn analyze(
        &self,
        raw_notes: &str,
    ) -> impl Future<Output = Result<NarrativeAssessment, AnalyzerError>> + Send;
}

/// Analyzer chosen at startup from configuration.
pub enum AnalyzerClient {
    Ollama(OllamaAnalyzer),
    OpenAi(OpenAiAnalyzer),
    Passthrough(PassthroughAnalyzer),
}

impl AnalyzerClient {
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        match config.backend {
            AnalyzerBackend::Ollama => OllamaAnalyzer::new(config).map(Self::Ollama),
            AnalyzerBackend::OpenAi => OpenAiAnalyzer::new(config).map(Self::OpenAi),
            AnalyzerBackend::Passthrough => Ok(Self::Passthrough(PassthroughAnalyzer)),
        }
    }

    pub fn backend(&self) -> AnalyzerBackend {
        match self {
            Self::Ollama(_) => AnalyzerBackend::Ollama,
            Self::OpenAi(_) => AnalyzerBackend::OpenAi,
            Self::Passthrough(_) => AnalyzerBackend::Passthrough,
        }
    }
}

impl NarrativeAnalyzer for AnalyzerClient {
    async fn analyze(&self, raw_notes: &str) -> Result<NarrativeAssessment, AnalyzerError> {
        match self {
            Self::Ollama(a) => a.analyze(raw_notes).await,
            Self::OpenAi(a) => a.analyze(raw_notes).await,
            Self::Passthrough(a) => a.analyze(raw_notes).await,
        }
    }
}

pub(crate) fn http_client(config: &AnalyzerConfig) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ConfigError::InvalidValue {
            key: "analyzer http client".into(),
            value: e.to_string(),
        })
}

pub(crate) fn classify_transport_error(
    e: reqwest::Error,
    base_url: &str,
    timeout_secs: u64,
) -> AnalyzerError {
    if e.is_connect() {
        AnalyzerError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        AnalyzerError::Timeout(timeout_secs)
    } else {
        AnalyzerError::HttpClient(e.to_string())
    }
}
