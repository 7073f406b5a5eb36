use crate::types::Hit;

/// Turns texts into fixed-width vectors.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Sentence-level similarity between two raw strings, in `[0, 1]`.
///
/// Implementations that are not thread-safe internally must be wrapped by the
/// caller; matchers never lock around this call.
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> anyhow::Result<f32>;
}

/// One matching strategy: scores a query against the whole corpus and
/// reports the top entry.
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str) -> crate::Result<Hit>;
}
