use faqmatch_core::config::DEFAULT_FALLBACK_MESSAGE;
use faqmatch_core::{Corpus, Hit, MatchResult, Method};

/// Accepts a hit when `score >= threshold`; anything lower becomes the
/// fallback response carrying the same confidence.
#[derive(Debug, Clone)]
pub struct ThresholdPolicy {
    fallback_message: String,
}

impl Default for ThresholdPolicy {
    fn default() -> Self { Self::new(DEFAULT_FALLBACK_MESSAGE) }
}

impl ThresholdPolicy {
    pub fn new(fallback_message: impl Into<String>) -> Self { Self { fallback_message: fallback_message.into() } }

    pub fn fallback_message(&self) -> &str { &self.fallback_message }

    pub fn assemble(&self, corpus: &Corpus, hit: Hit, threshold: f32, method: Method) -> MatchResult {
        match corpus.get(hit.index) {
            Some(entry) if hit.score >= threshold => MatchResult {
                answer: entry.answer.clone(),
                confidence: hit.score,
                matched_question: Some(entry.question.clone()),
                matched_index: Some(hit.index),
                method,
            },
            _ => MatchResult {
                answer: self.fallback_message.clone(),
                confidence: hit.score,
                matched_question: None,
                matched_index: None,
                method,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqmatch_core::Entry;

    fn corpus() -> Corpus { Corpus::new(vec![Entry::new("q0", "a0"), Entry::new("q1", "a1")]) }

    #[test]
    fn score_equal_to_threshold_is_accepted() {
        let result = ThresholdPolicy::default().assemble(&corpus(), Hit { index: 1, score: 0.3 }, 0.3, Method::Lexical);
        assert_eq!(result.answer, "a1");
        assert_eq!(result.matched_question.as_deref(), Some("q1"));
        assert_eq!(result.matched_index, Some(1));
    }

    #[test]
    fn score_below_threshold_falls_back() {
        let policy = ThresholdPolicy::new("nope");
        let result = policy.assemble(&corpus(), Hit { index: 1, score: 0.29 }, 0.3, Method::Semantic);
        assert_eq!(result.answer, "nope");
        assert!(result.is_fallback());
        assert_eq!(result.matched_index, None);
        assert!((result.confidence - 0.29).abs() < 1e-6);
        assert_eq!(result.method, Method::Semantic);
    }

    #[test]
    fn zero_threshold_accepts_degenerate_hit() {
        let result = ThresholdPolicy::default().assemble(&corpus(), Hit::DEGENERATE, 0.0, Method::Lexical);
        assert_eq!(result.matched_index, Some(0));
    }
}
