use std::sync::Arc;

use faqmatch_core::traits::Scorer;
use faqmatch_core::{Hit, Result};

use crate::index::CorpusIndex;

/// TF-IDF cosine scorer over a shared, immutable [`CorpusIndex`].
#[derive(Clone)]
pub struct LexicalMatcher {
    index: Arc<CorpusIndex>,
}

impl LexicalMatcher {
    pub fn new(index: Arc<CorpusIndex>) -> Self { Self { index } }

    pub fn index(&self) -> &CorpusIndex { &self.index }

    pub fn best_match(&self, query: &str) -> Hit {
        let hit = Hit::first_max(self.index.similarities(query));
        tracing::debug!(query, index = hit.index, score = hit.score, "lexical best match");
        hit
    }
}

impl Scorer for LexicalMatcher {
    fn score(&self, query: &str) -> Result<Hit> { Ok(self.best_match(query)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Preprocessor;
    use faqmatch_core::{Corpus, Entry};

    fn matcher(questions: &[&str]) -> LexicalMatcher {
        let corpus: Corpus = questions.iter().map(|q| Entry::new(*q, "a")).collect();
        LexicalMatcher::new(Arc::new(CorpusIndex::build(Arc::new(corpus), Preprocessor::english()).unwrap()))
    }

    #[test]
    fn self_query_scores_one() {
        let m = matcher(&["What payment methods do you accept?", "How can I track my order?"]);
        let hit = m.best_match("How can I track my order?");
        assert_eq!(hit.index, 1);
        assert!((hit.score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_and_unknown_queries_are_degenerate() {
        let m = matcher(&["What payment methods do you accept?", "How can I track my order?"]);
        assert_eq!(m.best_match(""), Hit::DEGENERATE);
        assert_eq!(m.best_match("the and of"), Hit::DEGENERATE);
        assert_eq!(m.best_match("quantum physics"), Hit::DEGENERATE);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let m = matcher(&["refund policy", "track order", "refund policy"]);
        let hit = m.best_match("refund policy please");
        assert_eq!(hit.index, 0);
    }
}
