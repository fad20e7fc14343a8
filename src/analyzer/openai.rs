use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use super::prompt::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::{classify_transport_error, http_client, AnalyzerError, NarrativeAnalyzer};
use crate::config::{AnalyzerConfig, ConfigError};
use crate::error::truncate_upstream_body;
use crate::models::{AnalyzerBackend, NarrativeAssessment};

/// Narrative analyzer for OpenAI-compatible chat completion endpoints.
pub struct OpenAiAnalyzer {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OpenAiAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey(AnalyzerBackend::OpenAi))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client: http_client(config)?,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl NarrativeAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, raw_notes: &str) -> Result<NarrativeAssessment, AnalyzerError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let prompt = build_analysis_prompt(raw_notes);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ANALYSIS_SYSTEM_PROMPT.trim(),
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
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

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::ResponseParsing(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AnalyzerError::EmptyResponse)?;

        Ok(NarrativeAssessment::new(content.trim()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::Value;

    use super::*;
    use crate::test_support::serve;

    fn analyzer(base_url: &str) -> OpenAiAnalyzer {
        let mut config = AnalyzerConfig::for_backend(AnalyzerBackend::OpenAi);
        config.base_url = base_url.to_string();
        config.api_key = Some("sk-test".into());
        config.timeout_secs = 2;
        OpenAiAnalyzer::new(&config).unwrap()
    }

    #[test]
    fn requires_api_key() {
        let config = AnalyzerConfig::for_backend(AnalyzerBackend::OpenAi);
        assert!(matches!(
            OpenAiAnalyzer::new(&config),
            Err(ConfigError::MissingApiKey(_))
        ));
    }

    #[tokio::test]
    async fn sends_bearer_token_and_reads_first_choice() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if headers.get("authorization").and_then(|v| v.to_str().ok())
                    != Some("Bearer sk-test")
                {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                assert_eq!(body["model"], "gpt-4-turbo");
                assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["role"], "user");
                Ok(Json(serde_json::json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "High fall risk; not suitable." } },
                        { "message": { "role": "assistant", "content": "ignored" } }
                    ]
                })))
            }),
        );
        let base = serve(app).await;
        let narrative = analyzer(&base).analyze("Fell twice this month.").await.unwrap();
        assert_eq!(narrative.as_str(), "High fall risk; not suitable.");
    }

    #[tokio::test]
    async fn no_choices_is_empty_response() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(serde_json::json!({ "choices": [] })) }),
        );
        let base = serve(app).await;
        assert!(matches!(
            analyzer(&base).analyze("notes").await,
            Err(AnalyzerError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn rate_limit_is_retryable_upstream_error() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = serve(app).await;
        let err = analyzer(&base).analyze("notes").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Upstream { status: 429, .. }));
        assert!(err.is_retryable());
    }
}
