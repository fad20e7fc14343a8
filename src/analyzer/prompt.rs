pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a clinical screening assistant for a Hospital at Home program.
You read clinical notes and summarise whether the patient appears suitable
for acute care delivered at home.

RULES:
1. Base the assessment only on what the notes state.
2. Use the exact phrases "caregiver present", "managing care remotely",
   "high fall risk" and "requires IV vasopressors" when the notes support them.
3. Keep the assessment to a few sentences of plain text. No lists, no JSON.
"#;

/// Build the analysis prompt for one patient's notes.
pub fn build_analysis_prompt(raw_notes: &str) -> String {
    format!(
        "Analyze the following clinical notes and determine if the patient is eligible for \
         Hospital at Home. Consider stability, caregiver support, technology readiness, and \
         risk factors. Give a concise eligibility assessment:\n\n<notes>\n{}\n</notes>",
        raw_notes.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_trimmed_notes() {
        let prompt = build_analysis_prompt("\n  Patient stable.  \n");
        assert!(prompt.contains("<notes>\nPatient stable.\n</notes>"));
    }

    #[test]
    fn prompt_names_the_assessment_criteria() {
        let prompt = build_analysis_prompt("x");
        for criterion in ["stability", "caregiver support", "technology readiness", "risk factors"] {
            assert!(prompt.contains(criterion), "missing {criterion}");
        }
    }

    #[test]
    fn system_prompt_lists_signal_phrases() {
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("caregiver present"));
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("managing care remotely"));
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("high fall risk"));
    }
}
