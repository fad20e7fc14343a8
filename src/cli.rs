use clap::Parser;

use crate::config::{AnalyzerConfig, RankerConfig};
use crate::models::AnalyzerBackend;
use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "hah-ranker", version, about = "Rank patients for Hospital at Home")]
pub struct Cli {
    /// Comma-separated patient ids.
    #[arg(long, short = 'p', default_value = "PT-001, PT-002, PT-003")]
    pub patients: String,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Use canned records and notes and skip the analyzer model.
    #[arg(long)]
    pub offline: bool,

    /// Analyzer backend: ollama, openai or passthrough.
    #[arg(long)]
    pub analyzer: Option<AnalyzerBackend>,

    /// Patient record endpoint.
    #[arg(long)]
    pub fhir_url: Option<String>,

    /// Clinical notes endpoint.
    #[arg(long)]
    pub notes_url: Option<String>,

    /// Analyzer base URL.
    #[arg(long)]
    pub analyzer_url: Option<String>,

    /// Analyzer model name.
    #[arg(long)]
    pub model: Option<String>,

    /// Patients evaluated at once.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl Cli {
    /// Layer command-line flags over a configuration loaded from the environment.
    pub fn apply(&self, config: &mut RankerConfig) {
        let backend = if self.offline {
            Some(AnalyzerBackend::Passthrough)
        } else {
            self.analyzer
        };

        if let Some(backend) = backend {
            if backend != config.analyzer.backend {
                let previous = &config.analyzer;
                config.analyzer = AnalyzerConfig {
                    api_key: previous.api_key.clone(),
                    timeout_secs: previous.timeout_secs,
                    max_retries: previous.max_retries,
                    ..AnalyzerConfig::for_backend(backend)
                };
            }
        }

        if let Some(url) = &self.fhir_url {
            config.record_source.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = &self.notes_url {
            config.notes_source.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = &self.analyzer_url {
            config.analyzer.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = &self.model {
            config.analyzer.model = model.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }
}
