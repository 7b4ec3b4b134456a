//! Difficulty classification from lexical signals.
//!
//! Pure and deterministic: the same text always lands in the same category.

use crate::types::difficulty::DifficultyCategory;

/// Phrases that signal opposing views.
const COUNTER_KEYWORDS: &[&str] = &["however", "but", "critics", "opponents", "some argue"];

/// Phrases that signal empirical support.
const EVIDENCE_KEYWORDS: &[&str] = &["study", "research", "data", "statistics", "survey"];

/// Word count above which a complex article becomes highly complex.
const LONG_ARTICLE_WORDS: usize = 2000;

/// Lexical signals behind a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSignals {
    /// Any counter keyword occurs as a substring (case-insensitive)
    pub has_counter: bool,

    /// Any evidence keyword occurs as a substring (case-insensitive)
    pub has_evidence: bool,

    /// Whitespace-delimited tokens
    pub word_count: usize,
}

impl TextSignals {
    /// Analyze text.
    pub fn analyze(text: &str) -> Self {
        let lower = text.to_lowercase();

        Self {
            has_counter: COUNTER_KEYWORDS.iter().any(|k| lower.contains(k)),
            has_evidence: EVIDENCE_KEYWORDS.iter().any(|k| lower.contains(k)),
            word_count: text.split_whitespace().count(),
        }
    }

    /// Apply the decision table; first match wins.
    pub fn category(&self) -> DifficultyCategory {
        match (self.has_counter, self.has_evidence) {
            (true, true) if self.word_count > LONG_ARTICLE_WORDS => {
                DifficultyCategory::HighlyComplex
            }
            (true, true) => DifficultyCategory::Complex,
            (true, false) => DifficultyCategory::DebateHeavy,
            (false, true) => DifficultyCategory::EvidenceHeavy,
            (false, false) => DifficultyCategory::Simple,
        }
    }
}

/// Classify an article's difficulty.
pub fn classify(text: &str) -> DifficultyCategory {
    TextSignals::analyze(text).category()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_simple() {
        assert_eq!(
            classify("The city opened a new park on Sunday."),
            DifficultyCategory::Simple
        );
        assert_eq!(classify(""), DifficultyCategory::Simple);
    }

    #[test]
    fn test_debate_heavy() {
        assert_eq!(
            classify("The plan is popular. Critics disagree."),
            DifficultyCategory::DebateHeavy
        );
    }

    #[test]
    fn test_evidence_heavy() {
        assert_eq!(
            classify("A SURVEY of residents found broad approval."),
            DifficultyCategory::EvidenceHeavy
        );
    }

    #[test]
    fn test_complex() {
        assert_eq!(
            classify("Research supports the plan, however opponents remain."),
            DifficultyCategory::Complex
        );
    }

    #[test]
    fn test_long_text_with_both_signals_is_highly_complex_not_complex() {
        let text = format!("{} however the study says otherwise", words(2000));
        assert!(TextSignals::analyze(&text).word_count > 2000);
        assert_eq!(classify(&text), DifficultyCategory::HighlyComplex);
    }

    #[test]
    fn test_exactly_2000_words_is_not_highly_complex() {
        let text = format!("{} however data", words(1998));
        assert_eq!(TextSignals::analyze(&text).word_count, 2000);
        assert_eq!(classify(&text), DifficultyCategory::Complex);
    }

    #[test]
    fn test_long_text_with_one_signal_stays_in_its_category() {
        let text = format!("{} but", words(3000));
        assert_eq!(classify(&text), DifficultyCategory::DebateHeavy);
    }

    #[test]
    fn test_substring_matching() {
        // "but" inside "butter", "data" inside "database"
        let signals = TextSignals::analyze("butter database");
        assert!(signals.has_counter);
        assert!(signals.has_evidence);
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic_and_total(text in ".{0,400}") {
            let first = classify(&text);
            prop_assert_eq!(first, classify(&text));
            prop_assert!(DifficultyCategory::ALL.contains(&first));
        }

        #[test]
        fn prop_case_does_not_matter(text in "[a-zA-Z ]{0,200}") {
            prop_assert_eq!(classify(&text.to_uppercase()), classify(&text.to_lowercase()));
        }
    }
}
