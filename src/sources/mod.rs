//! Data-source collaborators: structured patient records and raw clinical notes.
//!
//! Both are async at the boundary. Failures are reported, never papered over
//! here; the ranking pass decides what fallback to use.

pub mod fhir;
pub mod fixture;
pub mod notes;

pub use fhir::*;
pub use fixture::*;
pub use notes::*;

use std::future::Future;

use thiserror::Error;

use crate::models::PatientRecord;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Source returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Invalid patient id: '{0}'")]
    InvalidPatientId(String),
}

/// Fetches the structured record for a patient.
pub trait RecordSource: Send + Sync {
    fn fetch(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<PatientRecord, SourceError>> + Send;
}

/// Fetches free-text clinical notes for a patient.
pub trait NotesSource: Send + Sync {
    fn fetch(&self, patient_id: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Build a shared HTTP client with the given request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SourceError::HttpClient(e.to_string()))
}

/// Map a transport error to a `SourceError`, in the order connect, timeout, other.
pub(crate) fn classify_transport_error(
    e: reqwest::Error,
    base_url: &str,
    timeout_secs: u64,
) -> SourceError {
    if e.is_connect() {
        SourceError::Connection(base_url.to_string())
    } else if e.is_timeout() {
        SourceError::Timeout(timeout_secs)
    } else {
        SourceError::HttpClient(e.to_string())
    }
}

/// Patient ids become a single URL path segment, so they must not carry separators,
/// percent-escapes or dot segments that URL normalization would resolve away.
pub(crate) fn check_patient_id(patient_id: &str) -> Result<&str, SourceError> {
    let id = patient_id.trim();
    let escapes_segment = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '?', '#', '%'])
        || id.chars().any(|c| c.is_whitespace() || c.is_control());
    if escapes_segment {
        return Err(SourceError::InvalidPatientId(patient_id.to_string()));
    }
    Ok(id)
}
