use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XLMRobertaConfig, XLMRobertaModel};
use tokenizers::Tokenizer;

use faqmatch_core::traits::Embedder;

use crate::pool::masked_mean_l2;

const MAX_LEN: usize = 256;
const SLOW_EMBED_MS: u128 = 100;

/// Sentence encoder for XLM-RoBERTa family checkpoints (BGE-M3,
/// paraphrase-multilingual, ...). The sentence vector is the masked mean of
/// the last hidden states, L2-normalized.
///
/// Expects `tokenizer.json`, `config.json` and either `model.safetensors` or
/// `pytorch_model.bin` inside the model directory.
pub struct TransformerEmbedder {
    model: XLMRobertaModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
}

impl TransformerEmbedder {
    pub fn load(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "loading transformer embedder");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config_raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        let config: XLMRobertaConfig = serde_json::from_str(&config_raw)
            .with_context(|| format!("parsing {}", config_path.display()))?;
        let dim: usize = serde_json::from_str::<serde_json::Value>(&config_raw)?
            .get("hidden_size")
            .and_then(serde_json::Value::as_u64)
            .map(|d| d as usize)
            .ok_or_else(|| anyhow!("{} has no hidden_size", config_path.display()))?;

        let weights = load_weights(model_dir, &device)?;
        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = XLMRobertaModel::new(&config, vb).context("building XLM-RoBERTa model")?;
        tracing::info!(dim, "transformer embedder ready");
        Ok(Self { model, tokenizer, device, dim })
    }

    /// `[1, T]` id and mask tensors, truncated to [`MAX_LEN`] tokens, unpadded.
    fn encode(&self, text: &str) -> Result<(Tensor, Tensor)> {
        let enc = self.tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let len = enc.get_ids().len().min(MAX_LEN);
        let ids = Tensor::new(&enc.get_ids()[..len], &self.device)?.unsqueeze(0)?;
        let mask = Tensor::new(&enc.get_attention_mask()[..len], &self.device)?.unsqueeze(0)?;
        Ok((ids, mask))
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = self.encode(text)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let vector: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        let elapsed = start.elapsed().as_millis();
        if elapsed > SLOW_EMBED_MS {
            tracing::warn!(elapsed_ms = elapsed as u64, "slow embedding");
        }
        Ok(vector)
    }
}

fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(dev) => {
                tracing::info!(device = "metal", "selected compute device");
                return dev;
            }
            Err(e) => tracing::warn!(error = %e, "Metal unavailable, using CPU"),
        }
    }
    tracing::info!(device = "cpu", "selected compute device");
    Device::Cpu
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        return candle_core::safetensors::load(&safetensors, device)
            .with_context(|| format!("loading {}", safetensors.display()));
    }
    let pickle = model_dir.join("pytorch_model.bin");
    let weights = candle_core::pickle::read_all(&pickle)
        .with_context(|| format!("loading {}", pickle.display()))?;
    weights
        .into_iter()
        .map(|(name, tensor)| -> Result<(String, Tensor)> { Ok((name, tensor.to_device(device)?)) })
        .collect()
}

impl Embedder for TransformerEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_one(t)).collect()
    }
}
