//! faqmatch-text
//!
//! Text normalization and the TF-IDF side of matching: the preprocessing
//! pipeline, the frozen corpus index and the lexical scorer.

pub mod analyzer;
pub mod index;
pub mod lemma;
pub mod pipeline;
pub mod search;

pub use analyzer::StopWords;
pub use index::{CorpusIndex, IndexStats};
pub use lemma::{EnglishLemmatizer, Lemmatizer};
pub use pipeline::{Preprocessor, Synonyms};
pub use search::LexicalMatcher;
