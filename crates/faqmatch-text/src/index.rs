use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use faqmatch_core::{Corpus, Error, Result};

use crate::pipeline::Preprocessor;

/// L2-normalized sparse vector; entries sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    fn normalized(mut entries: Vec<(usize, f32)>) -> Self {
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        } else {
            entries.clear();
        }
        Self { entries }
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[(usize, f32)] { &self.entries }

    /// Cosine of two unit vectors: a merge walk over the shared dimensions.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0f32);
        while i < self.entries.len() && j < other.entries.len() {
            let (da, wa) = self.entries[i];
            let (db, wb) = other.entries[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub entries: usize,
    pub vocabulary: usize,
    /// Entries whose question normalized to no tokens at all.
    pub empty_questions: usize,
}

/// Build-once TF-IDF view of the corpus.
///
/// `tokens`, `rows` and the corpus are parallel arrays indexed by entry
/// position. The vocabulary is frozen at build time: dimensions follow sorted
/// term order and queries can never add new ones.
pub struct CorpusIndex {
    corpus: Arc<Corpus>,
    preprocessor: Preprocessor,
    tokens: Vec<Vec<String>>,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f32>,
    rows: Vec<SparseVector>,
}

impl CorpusIndex {
    /// Fails with [`Error::EmptyCorpus`] when there is nothing to index.
    pub fn build(corpus: Arc<Corpus>, preprocessor: Preprocessor) -> Result<Self> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let tokens: Vec<Vec<String>> = corpus.questions().map(|q| preprocessor.normalize(q)).collect();

        let terms: Vec<String> = tokens
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let vocabulary: HashMap<String, usize> =
            terms.iter().enumerate().map(|(dim, term)| (term.clone(), dim)).collect();

        let mut df = vec![0usize; terms.len()];
        for doc in &tokens {
            let seen: BTreeSet<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for dim in seen {
                df[dim] += 1;
            }
        }
        let n = corpus.len() as f32;
        let idf: Vec<f32> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0).collect();

        let rows: Vec<SparseVector> = tokens.iter().map(|doc| weigh(doc, &vocabulary, &idf)).collect();

        let index = Self { corpus, preprocessor, tokens, vocabulary, terms, idf, rows };
        let stats = index.stats();
        tracing::info!(
            entries = stats.entries,
            vocabulary = stats.vocabulary,
            empty_questions = stats.empty_questions,
            "built corpus index"
        );
        if stats.empty_questions > 0 {
            tracing::warn!(count = stats.empty_questions, "some questions have no informative tokens and can never match lexically");
        }
        Ok(index)
    }

    /// Projects text into the frozen vocabulary. Unknown tokens are dropped;
    /// the result is the zero vector when nothing survives.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        weigh(&self.preprocessor.normalize(text), &self.vocabulary, &self.idf)
    }

    /// Cosine similarity of `text` against every entry, in corpus order.
    pub fn similarities(&self, text: &str) -> Vec<f32> {
        let query = self.vectorize(text);
        if query.is_zero() {
            return vec![0.0; self.rows.len()];
        }
        self.rows.iter().map(|row| row.dot(&query)).collect()
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn shared_corpus(&self) -> Arc<Corpus> { Arc::clone(&self.corpus) }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn tokens(&self, index: usize) -> Option<&[String]> { self.tokens.get(index).map(Vec::as_slice) }

    pub fn row(&self, index: usize) -> Option<&SparseVector> { self.rows.get(index) }

    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn idf(&self, term: &str) -> Option<f32> { self.vocabulary.get(term).map(|&dim| self.idf[dim]) }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.rows.len(),
            vocabulary: self.terms.len(),
            empty_questions: self.tokens.iter().filter(|t| t.is_empty()).count(),
        }
    }
}

/// Raw term counts times IDF, L2-normalized.
fn weigh(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> SparseVector {
    let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
    for token in tokens {
        if let Some(&dim) = vocabulary.get(token) {
            *counts.entry(dim).or_insert(0.0) += 1.0;
        }
    }
    SparseVector::normalized(counts.into_iter().map(|(dim, tf)| (dim, tf * idf[dim])).collect())
}
