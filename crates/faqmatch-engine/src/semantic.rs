use std::sync::Arc;

use faqmatch_core::traits::{Scorer, Similarity};
use faqmatch_core::types::clamp_unit;
use faqmatch_core::{Corpus, Error, Hit, Result};

/// Scores a query against every raw corpus question through a similarity
/// collaborator. Every call rescans the corpus; nothing is precomputed.
///
/// A failing comparison fails the whole query: no partial best-effort hit is
/// returned.
#[derive(Clone)]
pub struct SemanticMatcher {
    corpus: Arc<Corpus>,
    similarity: Arc<dyn Similarity>,
}

impl SemanticMatcher {
    pub fn new(corpus: Arc<Corpus>, similarity: Arc<dyn Similarity>) -> Self { Self { corpus, similarity } }
}

impl Scorer for SemanticMatcher {
    fn score(&self, query: &str) -> Result<Hit> {
        let mut best = Hit::DEGENERATE;
        for (index, entry) in self.corpus.iter().enumerate() {
            let score = self.similarity.similarity(query, &entry.question).map_err(Error::similarity)?;
            let score = clamp_unit(score);
            if score > best.score {
                best = Hit { index, score };
            }
        }
        tracing::debug!(query, index = best.index, score = best.score, "semantic best match");
        Ok(best)
    }
}
