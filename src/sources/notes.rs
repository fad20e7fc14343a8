use reqwest::header::ACCEPT;

use super::{check_patient_id, classify_transport_error, http_client, NotesSource, SourceError};
use crate::config::SourceConfig;
use crate::error::truncate_upstream_body;

/// Notes source that reads plain-text clinical notes over HTTP.
///
/// `GET {base_url}/{patient_id}`; the response body is the note text.
pub struct HttpNotesSource {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpNotesSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: http_client(config.timeout_secs)?,
            timeout_secs: config.timeout_secs,
        })
    }
}

impl NotesSource for HttpNotesSource {
    async fn fetch(&self, patient_id: &str) -> Result<String, SourceError> {
        let id = check_patient_id(patient_id)?;
        let url = format!("{}/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(|e| classify_transport_error(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate_upstream_body(response.text().await.unwrap_or_default());
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::ResponseParsing(e.to_string()))
    }
}
