use anyhow::{anyhow, ensure, Result};

use faqmatch_core::traits::{Embedder, Similarity};
use faqmatch_core::types::clamp_unit;

/// Cosine of two dense vectors; 0.0 when either has zero length.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 { 0.0 } else { dot / (na * nb) }
}

/// Similarity collaborator backed by an [`Embedder`]: embeds both texts and
/// returns their cosine clipped to `[0, 1]`. Nothing is cached.
pub struct EmbeddingSimilarity {
    embedder: Box<dyn Embedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Box<dyn Embedder>) -> Self { Self { embedder } }

    pub fn embedder(&self) -> &dyn Embedder { self.embedder.as_ref() }
}

impl Similarity for EmbeddingSimilarity {
    fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        let vectors = self.embedder.embed_batch(&[a.to_string(), b.to_string()])?;
        let [va, vb]: [Vec<f32>; 2] = vectors
            .try_into()
            .map_err(|v: Vec<Vec<f32>>| anyhow!("embedder returned {} vectors for 2 texts", v.len()))?;
        ensure!(va.len() == vb.len(), "embedding dimensions differ: {} vs {}", va.len(), vb.len());
        Ok(clamp_unit(cosine(&va, &vb)))
    }
}
