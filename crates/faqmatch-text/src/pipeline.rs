use std::collections::HashMap;
use std::sync::Arc;

use tantivy::tokenizer::{TextAnalyzer, TokenStream};

use faqmatch_core::config::TextSettings;

use crate::analyzer::{build_analyzer, StopWords};
use crate::lemma::{EnglishLemmatizer, Lemmatizer};

/// Folds lemmas onto a canonical term, e.g. `open -> hour`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synonyms {
    canonical: HashMap<String, String>,
}

impl Synonyms {
    pub fn new() -> Self { Self::default() }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let canonical = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().to_lowercase()))
            .collect();
        Self { canonical }
    }

    pub fn is_empty(&self) -> bool { self.canonical.is_empty() }

    /// Re-keys both sides through `lemmatizer` so pairs written as plain
    /// words match the terms the pipeline actually produces.
    pub fn lemmatized(self, lemmatizer: &dyn Lemmatizer) -> Self {
        let canonical = self
            .canonical
            .into_iter()
            .map(|(k, v)| (lemmatizer.lemmatize(&k), lemmatizer.lemmatize(&v)))
            .collect();
        Self { canonical }
    }

    fn fold(&self, term: String) -> String {
        match self.canonical.get(&term) {
            Some(target) => target.clone(),
            None => term,
        }
    }
}

/// Text -> normalized token sequence.
///
/// Steps: lower-case, split into word-like units, drop stopwords and tokens
/// without any alphabetic character, lemmatize, fold synonyms. The output
/// depends only on the input string and the resources given at construction.
#[derive(Clone)]
pub struct Preprocessor {
    analyzer: TextAnalyzer,
    lemmatizer: Arc<dyn Lemmatizer>,
    synonyms: Synonyms,
}

impl Preprocessor {
    pub fn new(stop_words: &StopWords, lemmatizer: Arc<dyn Lemmatizer>, synonyms: Synonyms) -> Self {
        let synonyms = synonyms.lemmatized(&*lemmatizer);
        Self { analyzer: build_analyzer(stop_words), lemmatizer, synonyms }
    }

    /// English stopwords and the stemming lemmatizer, no synonyms.
    pub fn english() -> Self {
        Self::new(&StopWords::english(), Arc::new(EnglishLemmatizer::new()), Synonyms::new())
    }

    pub fn from_settings(settings: &TextSettings) -> Self {
        let mut stop_words = StopWords::english();
        stop_words.extend(&settings.extra_stopwords);
        let lemmatizer = EnglishLemmatizer::new().with_overrides(&settings.lemma_overrides);
        Self::new(&stop_words, Arc::new(lemmatizer), Synonyms::from_pairs(&settings.synonyms))
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        // token_stream needs &mut; a clone keeps normalize callable through &self
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            let word = stream.token().text.as_str();
            if !word.chars().any(char::is_alphabetic) {
                continue;
            }
            tokens.push(self.synonyms.fold(self.lemmatizer.lemmatize(word)));
        }
        tokens
    }
}
