use reqwest::header::ACCEPT;

use super::{check_patient_id, classify_transport_error, http_client, RecordSource, SourceError};
use crate::config::SourceConfig;
use crate::error::truncate_upstream_body;
use crate::models::PatientRecord;

/// Record source backed by the EHR's patient-data endpoint.
///
/// `GET {base_url}/{patient_id}` returns one flat JSON patient record.
pub struct FhirRecordSource {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl FhirRecordSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: http_client(config.timeout_secs)?,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RecordSource for FhirRecordSource {
    async fn fetch(&self, patient_id: &str) -> Result<PatientRecord, SourceError> {
        let id = check_patient_id(patient_id)?;
        let url = format!("{}/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
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

        let record: PatientRecord = response
            .json()
            .await
            .map_err(|e| SourceError::ResponseParsing(e.to_string()))?;

        if record.patient_id != id {
            tracing::warn!(
                requested = %id,
                returned = %record.patient_id,
                "Record source answered with a different patient id"
            );
        }

        Ok(record)
    }
}
