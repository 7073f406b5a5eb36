//! faqmatch-embed
//!
//! Embedders and the embedding-backed similarity collaborator used by the
//! semantic matcher. Set `APP_USE_FAKE_EMBEDDINGS=1` to stand the hashed
//! fake embedder in for the transformer when no model files are around.

pub mod fake;
pub mod pool;
pub mod similarity;
pub mod transformer;
pub mod word_vectors;

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use faqmatch_core::config::{EmbedBackend, EmbedSettings};
use faqmatch_core::traits::Embedder;

pub use fake::FakeEmbedder;
pub use pool::masked_mean_l2;
pub use similarity::{cosine, EmbeddingSimilarity};
pub use transformer::TransformerEmbedder;
pub use word_vectors::WordVectors;

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Builds the configured backend. `APP_USE_FAKE_EMBEDDINGS` only replaces the
/// transformer, which is the one backend that needs model files.
pub fn embedder_from_settings(settings: &EmbedSettings) -> Result<Box<dyn Embedder>> {
    match settings.backend {
        EmbedBackend::Fake => {
            tracing::warn!("embed.backend = \"fake\"; semantic scores come from hashed tokens, not a model");
            Ok(Box::new(FakeEmbedder::default()))
        }
        EmbedBackend::WordVectors => {
            let path = settings
                .word_vectors_path
                .as_deref()
                .ok_or_else(|| anyhow!("embed.word_vectors_path is not set"))?;
            Ok(Box::new(WordVectors::load(path)?.with_english_stopwords()))
        }
        EmbedBackend::Transformer if use_fake_embeddings() => {
            tracing::info!("APP_USE_FAKE_EMBEDDINGS set; using FakeEmbedder");
            Ok(Box::new(FakeEmbedder::default()))
        }
        EmbedBackend::Transformer => {
            let dir = resolve_model_dir(settings.model_dir.as_deref())?;
            Ok(Box::new(TransformerEmbedder::load(&dir)?))
        }
    }
}

/// Configured directory first, then `APP_MODEL_DIR`, `MODEL_DIR` and
/// `models/` relative to the working directory.
pub fn resolve_model_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = configured {
        if p.exists() { return Ok(p.to_path_buf()); }
        return Err(anyhow!("Configured model directory {} does not exist", p.display()));
    }
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = PathBuf::from(&dir);
            if p.exists() { tracing::info!(dir = %p.display(), "using {}", var); return Ok(p); }
        }
    }
    let local = Path::new("models");
    if local.join("config.json").exists() { return Ok(local.to_path_buf()); }
    Err(anyhow!("Could not locate a transformer model directory (set embed.model_dir or APP_MODEL_DIR)"))
}
