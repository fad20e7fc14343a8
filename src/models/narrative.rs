use serde::{Deserialize, Serialize};

/// Free-text output of clinical-note analysis.
///
/// No structure is guaranteed. Consumers may only look for substrings in it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeAssessment(String);

impl NarrativeAssessment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Assessment used when no analysis could be produced.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<String> for NarrativeAssessment {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for NarrativeAssessment {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

// Note text is PHI; keep it out of debug output and logs.
impl std::fmt::Debug for NarrativeAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NarrativeAssessment({} bytes)", self.0.len())
    }
}
