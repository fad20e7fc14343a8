//! Runtime configuration.
//!
//! One explicit `RankerConfig` is built at startup (environment, then CLI
//! overrides) and handed to each collaborator constructor. Nothing reads the
//! environment after that.

use serde::Serialize;
use thiserror::Error;

use crate::models::AnalyzerBackend;

/// Application-level constants
pub const APP_NAME: &str = "hah-ranker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_FHIR_URL: &str = "https://epic.fhir.server/patient-data";
pub const DEFAULT_NOTES_URL: &str = "https://epic.fhir.server/clinical-notes";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OLLAMA_MODEL: &str = "medgemma";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";

const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 120;
const DEFAULT_ANALYZER_RETRIES: u32 = 1;
const DEFAULT_CONCURRENCY: usize = 4;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hah_ranker=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("The {0} analyzer backend requires an API key (set OPENAI_API_KEY)")]
    MissingApiKey(AnalyzerBackend),
}

/// Connection settings for an HTTP data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl SourceConfig {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }
}

/// Narrative analyzer settings.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerConfig {
    pub backend: AnalyzerBackend,
    pub base_url: String,
    pub model: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Extra attempts after a retryable failure.
    pub max_retries: u32,
}

impl AnalyzerConfig {
    /// Defaults for a backend: its standard endpoint and preferred model.
    pub fn for_backend(backend: AnalyzerBackend) -> Self {
        let (base_url, model) = match backend {
            AnalyzerBackend::Ollama | AnalyzerBackend::Passthrough => {
                (DEFAULT_OLLAMA_URL, DEFAULT_OLLAMA_MODEL)
            }
            AnalyzerBackend::OpenAi => (DEFAULT_OPENAI_URL, DEFAULT_OPENAI_MODEL),
        };
        Self {
            backend,
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_ANALYZER_TIMEOUT_SECS,
            max_retries: DEFAULT_ANALYZER_RETRIES,
        }
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("backend", &self.backend)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Everything a ranking pass needs to reach its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankerConfig {
    pub record_source: SourceConfig,
    pub notes_source: SourceConfig,
    pub analyzer: AnalyzerConfig,
    /// Patients evaluated at once.
    pub concurrency: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            record_source: SourceConfig::new(DEFAULT_FHIR_URL, DEFAULT_SOURCE_TIMEOUT_SECS),
            notes_source: SourceConfig::new(DEFAULT_NOTES_URL, DEFAULT_SOURCE_TIMEOUT_SECS),
            analyzer: AnalyzerConfig::for_backend(AnalyzerBackend::Ollama),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl RankerConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source_timeout = match get("HAH_SOURCE_TIMEOUT_SECS") {
            Some(raw) => parse_number("HAH_SOURCE_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_SOURCE_TIMEOUT_SECS,
        };

        let backend = match get("HAH_ANALYZER") {
            Some(raw) => raw.parse::<AnalyzerBackend>().map_err(|_| ConfigError::InvalidValue {
                key: "HAH_ANALYZER".into(),
                value: raw,
            })?,
            None => AnalyzerBackend::Ollama,
        };

        let mut analyzer = AnalyzerConfig::for_backend(backend);
        if let Some(url) = get("HAH_ANALYZER_URL") {
            analyzer.base_url = url;
        }
        analyzer.base_url = analyzer.base_url.trim_end_matches('/').to_string();
        if let Some(model) = get("HAH_ANALYZER_MODEL") {
            analyzer.model = model;
        }
        analyzer.api_key = get("HAH_ANALYZER_API_KEY").or_else(|| get("OPENAI_API_KEY"));
        if let Some(raw) = get("HAH_ANALYZER_TIMEOUT_SECS") {
            analyzer.timeout_secs = parse_number("HAH_ANALYZER_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("HAH_ANALYZER_RETRIES") {
            analyzer.max_retries = parse_number("HAH_ANALYZER_RETRIES", &raw)?;
        }

        let concurrency = match get("HAH_CONCURRENCY") {
            Some(raw) => parse_number::<usize>("HAH_CONCURRENCY", &raw)?,
            None => DEFAULT_CONCURRENCY,
        };
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HAH_CONCURRENCY".into(),
                value: "0".into(),
            });
        }

        Ok(Self {
            record_source: SourceConfig::new(
                &get("HAH_FHIR_URL").unwrap_or_else(|| DEFAULT_FHIR_URL.into()),
                source_timeout,
            ),
            notes_source: SourceConfig::new(
                &get("HAH_NOTES_URL").unwrap_or_else(|| DEFAULT_NOTES_URL.into()),
                source_timeout,
            ),
            analyzer,
            concurrency,
        })
    }

    /// Check cross-field requirements before any collaborator is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.backend == AnalyzerBackend::OpenAi && self.analyzer.api_key.is_none() {
            return Err(ConfigError::MissingApiKey(AnalyzerBackend::OpenAi));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "concurrency".into(),
                value: "0".into(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
