//! Pretrained word-vector tables (GloVe / word2vec text format).
//!
//! A sentence embeds to the mean vector of its known, informative tokens.
//! Stopwords, punctuation and pure numbers are skipped; a sentence with no
//! known tokens embeds to the zero vector.

use anyhow::{bail, ensure, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use faqmatch_core::lexicon::ENGLISH_STOPWORDS;
use faqmatch_core::traits::Embedder;

pub struct WordVectors {
    dim: usize,
    table: HashMap<String, Vec<f32>>,
    stop_words: HashSet<String>,
}

impl WordVectors {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening word vectors {}", path.display()))?;
        let vectors = Self::parse(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(path = %path.display(), words = vectors.len(), dim = vectors.dim, "loaded word vectors");
        Ok(vectors)
    }

    /// One `word v1 v2 ...` record per line. A leading `count dim` header
    /// line (word2vec text format) is skipped.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = HashMap::new();
        let mut dim = None;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            let values: Vec<&str> = parts.collect();
            if lineno == 0 && values.len() == 1 && word.parse::<usize>().is_ok() && values[0].parse::<usize>().is_ok() {
                continue;
            }
            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .with_context(|| format!("line {}: bad number", lineno + 1))?;
            match dim {
                None => dim = Some(vector.len()),
                Some(d) => ensure!(vector.len() == d, "line {}: expected {} values, got {}", lineno + 1, d, vector.len()),
            }
            table.insert(word.to_lowercase(), vector);
        }
        let Some(dim) = dim.filter(|&d| d > 0) else { bail!("no word vectors found") };
        Ok(Self { dim, table, stop_words: HashSet::new() })
    }

    /// Skip these words when averaging.
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        self
    }

    pub fn with_english_stopwords(self) -> Self { self.with_stopwords(ENGLISH_STOPWORDS.iter().copied()) }

    pub fn len(&self) -> usize { self.table.len() }

    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    pub fn get(&self, word: &str) -> Option<&[f32]> { self.table.get(word).map(Vec::as_slice) }

    pub fn sentence_vector(&self, text: &str) -> Vec<f32> {
        let mut sum = vec![0f32; self.dim];
        let mut count = 0usize;
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().any(char::is_alphabetic))
            .filter(|t| !self.stop_words.contains(*t));
        for token in tokens {
            if let Some(v) = self.table.get(token) {
                for (acc, x) in sum.iter_mut().zip(v) {
                    *acc += x;
                }
                count += 1;
            }
        }
        if count > 0 {
            for acc in &mut sum {
                *acc /= count as f32;
            }
        }
        sum
    }
}

impl Embedder for WordVectors {
    fn dim(&self) -> usize { self.dim }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.sentence_vector(t)).collect())
    }
}
