//! Canned sources for offline runs and tests.

use std::collections::HashMap;

use super::{NotesSource, RecordSource, SourceError};
use crate::models::PatientRecord;

/// Clinical note returned when no per-patient note is registered.
pub const DEFAULT_CLINICAL_NOTES: &str = "The patient is medically stable with no acute distress. \
Home environment is safe, and a caregiver is present. \
History of CHF but well managed with current medications. No recent falls. \
Patient has used telehealth services in the past and reports confidence in managing care remotely.";

/// Record source that never touches the network.
///
/// Unknown ids get `PatientRecord::fallback`.
#[derive(Debug, Clone, Default)]
pub struct FixtureRecordSource {
    records: HashMap<String, PatientRecord>,
    unavailable: bool,
}

impl FixtureRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: PatientRecord) -> Self {
        self.records.insert(record.patient_id.clone(), record);
        self
    }

    /// Make every fetch fail, as if the source were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

impl RecordSource for FixtureRecordSource {
    async fn fetch(&self, patient_id: &str) -> Result<PatientRecord, SourceError> {
        if self.unavailable {
            return Err(SourceError::Connection("fixture".into()));
        }
        Ok(self
            .records
            .get(patient_id)
            .cloned()
            .unwrap_or_else(|| PatientRecord::fallback(patient_id)))
    }
}

/// Notes source that never touches the network.
#[derive(Debug, Clone)]
pub struct FixtureNotesSource {
    default_notes: String,
    notes: HashMap<String, String>,
    unavailable: bool,
}

impl Default for FixtureNotesSource {
    fn default() -> Self {
        Self {
            default_notes: DEFAULT_CLINICAL_NOTES.to_string(),
            notes: HashMap::new(),
            unavailable: false,
        }
    }
}

impl FixtureNotesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_notes(mut self, notes: &str) -> Self {
        self.default_notes = notes.to_string();
        self
    }

    pub fn with_notes(mut self, patient_id: &str, notes: &str) -> Self {
        self.notes.insert(patient_id.to_string(), notes.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

impl NotesSource for FixtureNotesSource {
    async fn fetch(&self, patient_id: &str) -> Result<String, SourceError> {
        if self.unavailable {
            return Err(SourceError::Connection("fixture".into()));
        }
        Ok(self
            .notes
            .get(patient_id)
            .cloned()
            .unwrap_or_else(|| self.default_notes.clone()))
    }
}
