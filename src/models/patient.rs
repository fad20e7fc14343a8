use serde::{Deserialize, Deserializer, Serialize};

/// Structured clinical attributes for one patient, as returned by the record source.
///
/// Values are taken as delivered. Range checks (e.g. `o2_sat` within 0..=100)
/// belong to the record source, not to consumers of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub age: i32,
    pub diagnosis: String,
    /// Emergency department visits in the trailing six months.
    pub ed_visits: u32,
    #[serde(deserialize_with = "yes_no")]
    pub icu_stay: bool,
    /// Peripheral oxygen saturation, percent.
    pub o2_sat: i32,
    pub cognitive_status: String,
    #[serde(deserialize_with = "yes_no")]
    pub adls_independent: bool,
    #[serde(deserialize_with = "yes_no")]
    pub caregiver_available: bool,
    #[serde(deserialize_with = "yes_no")]
    pub telehealth_history: bool,
    #[serde(deserialize_with = "yes_no")]
    pub internet_access: bool,
}

impl PatientRecord {
    /// Deterministic placeholder used when the record source cannot answer.
    pub fn fallback(patient_id: &str) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            age: 75,
            diagnosis: "CHF".into(),
            ed_visits: 2,
            icu_stay: false,
            o2_sat: 92,
            cognitive_status: "None".into(),
            adls_independent: true,
            caregiver_available: true,
            telehealth_history: true,
            internet_access: true,
        }
    }
}

/// Record sources report flags either as JSON booleans or as "Yes"/"No" strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Text(String),
}

fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(b) => Ok(b),
        FlagValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(true),
            "no" | "n" | "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected yes/no flag, got '{other}'"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_keeps_requested_id() {
        let record = PatientRecord::fallback("PT-042");
        assert_eq!(record.patient_id, "PT-042");
        assert_eq!(record.o2_sat, 92);
        assert!(!record.icu_stay);
        assert_eq!(record.diagnosis, "CHF");
    }

    #[test]
    fn deserializes_yes_no_strings() {
        let json = r#"{
            "patient_id": "PT-001",
            "age": 81,
            "diagnosis": "COPD",
            "ed_visits": 3,
            "icu_stay": "No",
            "o2_sat": 88,
            "cognitive_status": "Mild impairment",
            "adls_independent": "Yes",
            "caregiver_available": "yes",
            "telehealth_history": "NO",
            "internet_access": "Y"
        }"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert!(!record.icu_stay);
        assert!(record.adls_independent);
        assert!(record.caregiver_available);
        assert!(!record.telehealth_history);
        assert!(record.internet_access);
        assert_eq!(record.o2_sat, 88);
    }

    #[test]
    fn deserializes_json_booleans() {
        let json = r#"{
            "patient_id": "PT-002",
            "age": 64,
            "diagnosis": "CHF",
            "ed_visits": 0,
            "icu_stay": true,
            "o2_sat": 97,
            "cognitive_status": "None",
            "adls_independent": true,
            "caregiver_available": false,
            "telehealth_history": false,
            "internet_access": true
        }"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert!(record.icu_stay);
        assert!(!record.caregiver_available);
    }

    #[test]
    fn rejects_unrecognised_flag_text() {
        let mut value = serde_json::to_value(PatientRecord::fallback("PT-003")).unwrap();
        value["icu_stay"] = serde_json::json!("maybe");
        let err = serde_json::from_value::<PatientRecord>(value).unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn serializes_flags_as_booleans() {
        let json = serde_json::to_value(PatientRecord::fallback("PT-004")).unwrap();
        assert_eq!(json["icu_stay"], serde_json::json!(false));
        assert_eq!(json["internet_access"], serde_json::json!(true));
    }
}
