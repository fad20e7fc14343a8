use hah_ranker::eligibility::{
    classify_eligibility, explain_eligibility, HIGH_RISK_PHRASES, HOME_READINESS_PHRASES,
};
use hah_ranker::models::{NarrativeAssessment, PatientRecord, PriorityLabel};
use hah_ranker::ranking::{order_rows, FallbackFlags, RankingRow};
use proptest::prelude::*;

fn record(icu_stay: bool, o2_sat: i32) -> PatientRecord {
    PatientRecord {
        icu_stay,
        o2_sat,
        ..PatientRecord::fallback("PT-PROP")
    }
}

/// Randomly re-case an ASCII phrase using a bitmask.
fn recase(phrase: &str, mask: u64) -> String {
    phrase
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask >> (i % 64)) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Filler text whose alphabet is too small to spell any signal phrase.
fn filler() -> impl Strategy<Value = String> {
    "[qzxjk0-9 .,;]{0,40}"
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,80}",
        filler(),
        Just("caregiver present, managing care remotely".to_string()),
        Just("HIGH FALL RISK".to_string()),
    ]
}

proptest! {
    #[test]
    fn icu_stay_is_always_ineligible(o2_sat in 0i32..=100, text in any_text()) {
        let v = classify_eligibility(&record(true, o2_sat), &NarrativeAssessment::new(text));
        prop_assert_eq!(v.label(), PriorityLabel::Ineligible);
        prop_assert_eq!(v.score(), 0);
    }

    #[test]
    fn hypoxemia_always_needs_review(o2_sat in 0i32..90, text in any_text()) {
        let v = classify_eligibility(&record(false, o2_sat), &NarrativeAssessment::new(text));
        prop_assert_eq!(v.label(), PriorityLabel::NeedsReview);
        prop_assert_eq!(v.score(), 1);
    }

    #[test]
    fn risk_phrase_in_any_case_is_ineligible(
        o2_sat in 90i32..=100,
        which in 0usize..HIGH_RISK_PHRASES.len(),
        mask in any::<u64>(),
        before in filler(),
        after in filler(),
        positive in any::<bool>(),
    ) {
        let mut text = format!("{before}{}{after}", recase(HIGH_RISK_PHRASES[which], mask));
        if positive {
            text.push_str(" caregiver present; managing care remotely");
        }
        let v = classify_eligibility(&record(false, o2_sat), &NarrativeAssessment::new(text));
        prop_assert_eq!(v.label(), PriorityLabel::Ineligible);
        prop_assert_eq!(v.score(), 0);
    }

    #[test]
    fn readiness_pair_in_any_order_and_case_is_eligible(
        o2_sat in 90i32..=100,
        mask_a in any::<u64>(),
        mask_b in any::<u64>(),
        swap in any::<bool>(),
        sep in filler(),
        before in filler(),
    ) {
        let a = recase(HOME_READINESS_PHRASES[0], mask_a);
        let b = recase(HOME_READINESS_PHRASES[1], mask_b);
        let text = if swap {
            format!("{before}{b}{sep}{a}")
        } else {
            format!("{before}{a}{sep}{b}")
        };
        let v = classify_eligibility(&record(false, o2_sat), &NarrativeAssessment::new(text));
        prop_assert_eq!(v.label(), PriorityLabel::Eligible);
        prop_assert_eq!(v.score(), 2);
    }

    #[test]
    fn no_signal_needs_review(o2_sat in 90i32..=100, text in filler(), one_phrase in any::<bool>()) {
        let text = if one_phrase { format!("{text} caregiver present") } else { text };
        let v = classify_eligibility(&record(false, o2_sat), &NarrativeAssessment::new(text));
        prop_assert_eq!(v.label(), PriorityLabel::NeedsReview);
        prop_assert_eq!(v.score(), 1);
    }

    #[test]
    fn classification_is_deterministic(icu in any::<bool>(), o2_sat in 0i32..=100, text in any_text()) {
        let r = record(icu, o2_sat);
        let n = NarrativeAssessment::new(text);
        prop_assert_eq!(classify_eligibility(&r, &n), classify_eligibility(&r, &n));
    }

    #[test]
    fn ordering_groups_labels(
        inputs in proptest::collection::vec((any::<bool>(), 80i32..=100, any_text()), 0..40)
    ) {
        let mut rows: Vec<RankingRow> = inputs
            .iter()
            .enumerate()
            .map(|(i, (icu, o2_sat, text))| {
                let r = PatientRecord {
                    patient_id: format!("PT-{i:03}"),
                    ..record(*icu, *o2_sat)
                };
                let decision = explain_eligibility(&r, &NarrativeAssessment::new(text.as_str()));
                RankingRow::project(&r, decision, FallbackFlags::default())
            })
            .collect();
        order_rows(&mut rows);

        for pair in rows.windows(2) {
            prop_assert!(pair[0].priority_score >= pair[1].priority_score);
            if pair[0].priority_score == pair[1].priority_score {
                prop_assert!(pair[0].patient_id < pair[1].patient_id, "ties keep input order");
            }
        }
    }
}
