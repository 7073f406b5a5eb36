use anyhow::Result;
use std::sync::Arc;

use faqmatch_core::config::{DataSettings, Settings};
use faqmatch_core::corpus::{builtin_corpus, CorpusLoader};
use faqmatch_core::Corpus;
use faqmatch_embed::{embedder_from_settings, EmbeddingSimilarity};
use faqmatch_text::Preprocessor;

use crate::engine::FaqEngine;

/// Configured corpus file/directory, or the built-in FAQ set.
pub fn load_corpus(settings: &DataSettings) -> faqmatch_core::Result<Corpus> {
    match &settings.corpus_path {
        Some(path) => CorpusLoader::new().load(path),
        None => {
            tracing::info!("no data.corpus_path configured; using built-in FAQ");
            Ok(builtin_corpus())
        }
    }
}

/// One-time initialization: load the corpus, build the index and, when
/// `with_semantic` is set, wire the configured embedder in as the similarity
/// collaborator. Nothing is served before this returns.
pub fn build_engine(settings: &Settings, with_semantic: bool) -> Result<FaqEngine> {
    let corpus = load_corpus(&settings.data)?;
    let preprocessor = Preprocessor::from_settings(&settings.text);
    let mut engine = FaqEngine::with_settings(corpus, preprocessor, settings.matcher.clone())?;
    if with_semantic {
        let embedder = embedder_from_settings(&settings.embed)?;
        engine = engine.with_similarity(Arc::new(EmbeddingSimilarity::new(embedder)));
    }
    Ok(engine)
}
