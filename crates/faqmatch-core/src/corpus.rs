//! Corpus sources: the built-in FAQ set and JSON/TOML files on disk.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Corpus, Entry};

const BUILTIN_FAQ: &[(&str, &str)] = &[
    (
        "What are your business hours?",
        "We are open Monday to Friday from 9 AM to 6 PM EST. Weekend support is available via email.",
    ),
    (
        "How do I reset my password?",
        "Click on 'Forgot Password' on the login page, enter your email, and follow the instructions sent to your inbox.",
    ),
    (
        "What payment methods do you accept?",
        "We accept all major credit cards (Visa, MasterCard, AmEx), PayPal, and bank transfers for enterprise accounts.",
    ),
    (
        "How can I track my order?",
        "Log into your account and go to 'My Orders'. Click on the order number to see real-time tracking information.",
    ),
    (
        "What is your return policy?",
        "We offer 30-day returns for unused items in original packaging. Refunds are processed within 5-7 business days.",
    ),
    (
        "Do you offer technical support?",
        "Yes! Technical support is available 24/7 via live chat, email at support@company.com, or call 1-800-SUPPORT.",
    ),
    (
        "How do I upgrade my account?",
        "Go to Account Settings > Subscription > Upgrade Plan. Choose your desired plan and complete the payment process.",
    ),
    (
        "Is my data secure?",
        "Yes, we use 256-bit SSL encryption and are SOC 2 Type II certified. Your data is stored in secure, encrypted servers.",
    ),
    (
        "Can I cancel my subscription anytime?",
        "Yes, you can cancel anytime from your account settings. You'll have access until the end of your billing period.",
    ),
    (
        "Do you offer student discounts?",
        "Yes! Students get 50% off with a valid .edu email address. Apply the discount code at checkout.",
    ),
];

/// Sample queries shown to new users.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "What are your hours?",
    "How do I reset my password?",
    "What payment methods do you accept?",
    "How can I track my order?",
    "What is your return policy?",
    "Do you offer technical support?",
];

/// The customer-support FAQ shipped with the binary.
pub fn builtin_corpus() -> Corpus {
    BUILTIN_FAQ.iter().map(|(q, a)| Entry::new(*q, *a)).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCorpus {
    List(Vec<Entry>),
    Wrapped { entries: Vec<Entry> },
}

#[derive(Deserialize)]
struct TomlCorpus {
    #[serde(default, rename = "entry")]
    entries: Vec<Entry>,
}

/// Reads corpora from a single file or a directory tree of `.json`/`.toml`
/// files. Directory contents are concatenated in sorted path order so the
/// resulting indices are stable across runs.
#[derive(Debug, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    pub fn load(&self, path: &Path) -> Result<Corpus> {
        if path.is_dir() {
            return self.load_directory(path);
        }
        if !path.exists() {
            return Err(Error::corpus_load(path, "no such file or directory"));
        }
        let entries = self.load_file(path)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "loaded corpus file");
        Ok(Corpus::new(entries))
    }

    fn load_directory(&self, root: &Path) -> Result<Corpus> {
        let files = self.list_corpus_files(root);
        if files.is_empty() {
            tracing::warn!(dir = %root.display(), "no .json or .toml corpus files found");
            return Ok(Corpus::default());
        }
        let mut all_entries = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            tracing::debug!(file = %file_path.display(), "reading corpus file {}/{}", file_index + 1, files.len());
            all_entries.extend(self.load_file(file_path)?);
        }
        tracing::info!(files = files.len(), entries = all_entries.len(), "loaded corpus directory");
        Ok(Corpus::new(all_entries))
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Entry>> {
        let raw = fs::read_to_string(path).map_err(|e| Error::corpus_load(path, e))?;
        let entries = match extension(path).as_deref() {
            Some("json") => match serde_json::from_str::<JsonCorpus>(&raw) {
                Ok(JsonCorpus::List(entries)) | Ok(JsonCorpus::Wrapped { entries }) => entries,
                Err(e) => return Err(Error::corpus_load(path, e)),
            },
            Some("toml") => toml::from_str::<TomlCorpus>(&raw)
                .map_err(|e| Error::corpus_load(path, e))?
                .entries,
            _ => return Err(Error::corpus_load(path, "expected a .json or .toml file")),
        };
        Ok(entries.into_iter().map(trim_entry).collect())
    }

    fn list_corpus_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| matches!(extension(p).as_deref(), Some("json" | "toml")))
            .collect();
        files.sort();
        files
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase)
}

fn trim_entry(entry: Entry) -> Entry {
    Entry::new(entry.question.trim(), entry.answer.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_corpus_has_ten_entries_in_order() {
        let corpus = builtin_corpus();
        assert_eq!(corpus.len(), 10);
        assert_eq!(corpus.get(0).unwrap().question, "What are your business hours?");
        assert_eq!(corpus.get(9).unwrap().question, "Do you offer student discounts?");
    }
}
