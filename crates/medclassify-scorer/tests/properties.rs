//! Property tests for the scoring core

use medclassify_domain::{ClassificationInput, Domain};
use medclassify_scorer::{ConfidenceAggregator, DomainScorer};
use proptest::prelude::*;
use std::sync::OnceLock;

fn scorer() -> &'static DomainScorer {
    static SCORER: OnceLock<DomainScorer> = OnceLock::new();
    SCORER.get_or_init(|| DomainScorer::with_default_lexicon().expect("default lexicon compiles"))
}

const POOL: &[&str] = &[
    "heart", "coronary", "stent", "blood", "pressure", "brain", "sleep", "cortex", "eeg",
    "memory", "liver", "renal", "kidney", "dialysis", "cancer", "tumor", "metastasis",
    "patients", "study", "results", "the", "of", "and", "outcomes", "trial", "sueño",
    "corteza", "hígado", "quimioterapia",
];

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(POOL), 0..16).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn scores_are_bounded_for_arbitrary_text(title in any::<String>(), body in any::<String>()) {
        let scores = scorer().score(&ClassificationInput::new(title, body));
        for (_, s) in scores.entries() {
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn scores_are_bounded_for_medical_text(title in words(), body in words()) {
        let input = ClassificationInput::new(title, body);
        let scores = scorer().score(&input);
        for (_, s) in scores.entries() {
            prop_assert!((0.0..=1.0).contains(&s));
        }
        let confidence = ConfidenceAggregator.aggregate(&scores);
        prop_assert!((0.6..=0.98).contains(&confidence));
    }

    #[test]
    fn scoring_is_idempotent(title in words(), body in words()) {
        let input = ClassificationInput::new(title, body);
        prop_assert_eq!(scorer().report(&input), scorer().report(&input));
    }

    #[test]
    fn extra_title_keyword_never_lowers_raw_score(title in words(), body in words()) {
        let before = scorer().raw_scores(&ClassificationInput::new(title.clone(), body.clone()));
        let after = scorer().raw_scores(&ClassificationInput::new(format!("{} heart", title), body));
        prop_assert!(after.get(Domain::Cardiovascular) >= before.get(Domain::Cardiovascular));
    }
}
