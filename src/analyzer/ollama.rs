use serde::{Deserialize, Serialize};

use super::prompt::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::{classify_transport_error, http_client, AnalyzerError, NarrativeAnalyzer};
use crate::config::{AnalyzerConfig, ConfigError};
use crate::error::truncate_upstream_body;
use crate::models::NarrativeAssessment;

/// Narrative analyzer backed by a local Ollama instance.
pub struct OllamaAnalyzer {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OllamaAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client: http_client(config)?,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl NarrativeAnalyzer for OllamaAnalyzer {
    async fn analyze(&self, raw_notes: &str) -> Result<NarrativeAssessment, AnalyzerError> {
        let url = format!("{}/api/generate", self.base_url);
        let prompt = build_analysis_prompt(raw_notes);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &prompt,
            system: ANALYSIS_SYSTEM_PROMPT,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate_upstream_body(response.text().await.unwrap_or_default());
            return Err(AnalyzerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::ResponseParsing(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(AnalyzerError::EmptyResponse);
        }

        Ok(NarrativeAssessment::new(parsed.response.trim()))
    }
}
