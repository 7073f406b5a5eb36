use std::sync::Arc;

use faqmatch_core::config::{validate_threshold, MatcherSettings};
use faqmatch_core::traits::{Scorer, Similarity};
use faqmatch_core::{Corpus, Error, Hit, MatchResult, Method, Result};
use faqmatch_text::{CorpusIndex, LexicalMatcher, Preprocessor};

use crate::policy::ThresholdPolicy;
use crate::semantic::SemanticMatcher;

/// Explicitly owned matcher state: the built index, both strategies and the
/// threshold policy.
///
/// Everything inside is immutable after construction, so one engine can be
/// shared across threads behind an `Arc` and queried concurrently.
pub struct FaqEngine {
    index: Arc<CorpusIndex>,
    lexical: LexicalMatcher,
    semantic: Option<SemanticMatcher>,
    policy: ThresholdPolicy,
    default_method: Method,
    default_threshold: f32,
}

impl FaqEngine {
    /// Lexical-only engine with default matcher settings.
    pub fn new(corpus: Corpus, preprocessor: Preprocessor) -> Result<Self> {
        Self::with_settings(corpus, preprocessor, MatcherSettings::default())
    }

    /// Builds the corpus index up front; fails on an empty corpus or an
    /// out-of-range default threshold.
    pub fn with_settings(corpus: Corpus, preprocessor: Preprocessor, settings: MatcherSettings) -> Result<Self> {
        let default_threshold = validate_threshold(settings.threshold)?;
        let index = Arc::new(CorpusIndex::build(Arc::new(corpus), preprocessor)?);
        Ok(Self {
            lexical: LexicalMatcher::new(Arc::clone(&index)),
            index,
            semantic: None,
            policy: ThresholdPolicy::new(settings.fallback_message),
            default_method: settings.method,
            default_threshold,
        })
    }

    /// Enables [`Method::Semantic`] using `similarity` as the collaborator.
    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.semantic = Some(SemanticMatcher::new(self.index.shared_corpus(), similarity));
        self
    }

    pub fn supports(&self, method: Method) -> bool {
        match method {
            Method::Lexical => true,
            Method::Semantic => self.semantic.is_some(),
        }
    }

    fn scorer(&self, method: Method) -> Result<&dyn Scorer> {
        match method {
            Method::Lexical => Ok(&self.lexical),
            Method::Semantic => self
                .semantic
                .as_ref()
                .map(|s| s as &dyn Scorer)
                .ok_or_else(|| Error::InvalidConfig("semantic matching requested but no similarity backend is configured".into())),
        }
    }

    /// Top-1 hit for `query` before any threshold is applied.
    pub fn best_match(&self, query: &str, method: Method) -> Result<Hit> { self.scorer(method)?.score(query) }

    pub fn answer(&self, query: &str, method: Method, threshold: f32) -> Result<MatchResult> {
        let threshold = validate_threshold(threshold)?;
        let hit = self.best_match(query, method)?;
        let result = self.policy.assemble(self.index.corpus(), hit, threshold, method);
        tracing::debug!(
            %method,
            threshold,
            confidence = result.confidence,
            matched = ?result.matched_index,
            "answered query"
        );
        Ok(result)
    }

    /// Like [`answer`](Self::answer) with the strategy given as a string tag.
    pub fn answer_tagged(&self, query: &str, method: &str, threshold: f32) -> Result<MatchResult> {
        self.answer(query, method.parse()?, threshold)
    }

    /// Request-level entry point: rejects blank queries, then answers with
    /// the configured default method and threshold.
    pub fn ask(&self, query: &str) -> Result<MatchResult> { self.ask_with(query, self.default_method) }

    pub fn ask_with(&self, query: &str, method: Method) -> Result<MatchResult> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        self.answer(query, method, self.default_threshold)
    }

    pub fn corpus(&self) -> &Corpus { self.index.corpus() }

    pub fn index(&self) -> &CorpusIndex { &self.index }

    pub fn default_method(&self) -> Method { self.default_method }

    pub fn default_threshold(&self) -> f32 { self.default_threshold }

    pub fn fallback_message(&self) -> &str { self.policy.fallback_message() }
}
