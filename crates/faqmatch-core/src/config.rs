//! Layered configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_MATCHER__THRESHOLD=0.4`).
//! Relative paths in the settings resolve against the directory holding the
//! base config file.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::Method;

pub const DEFAULT_THRESHOLD: f32 = 0.3;
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I couldn't find a relevant answer. Please rephrase or contact support.";

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads `config.toml` from the working directory plus its overlays.
    pub fn load() -> anyhow::Result<Self> { Self::load_from(Path::new("config.toml")) }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        let base_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut figment = Figment::new().merge(Toml::file(path));
        match overlay_name(&env_name) {
            Some(overlay) => {
                figment = figment.merge(Toml::file(base_dir.join(format!("config.{overlay}.toml"))));
            }
            None => tracing::warn!(env = %env_name, "unrecognized RUST_ENV; no overlay applied"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment, base_dir })
    }

    /// Extracts the typed settings, resolving paths and validating values.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.resolve_paths(&self.base_dir);
        settings.validate()?;
        Ok(settings)
    }
}

fn overlay_name(env_name: &str) -> Option<&'static str> {
    match env_name {
        "dev" | "development" => Some("dev"),
        "prod" | "production" => Some("prod"),
        "test" | "testing" => Some("test"),
        _ => None,
    }
}

/// Full set of recognized options. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub matcher: MatcherSettings,
    pub text: TextSettings,
    pub embed: EmbedSettings,
    pub data: DataSettings,
}

impl Settings {
    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.take() {
                *p = Some(resolve_with_base(base, path.to_string_lossy()));
            }
        };
        resolve(&mut self.data.corpus_path);
        resolve(&mut self.embed.word_vectors_path);
        resolve(&mut self.embed.model_dir);
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_threshold(self.matcher.threshold)?;
        if self.embed.backend == EmbedBackend::WordVectors && self.embed.word_vectors_path.is_none() {
            return Err(Error::InvalidConfig(
                "embed.backend = \"word-vectors\" requires embed.word_vectors_path".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    pub threshold: f32,
    pub method: Method,
    pub fallback_message: String,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            method: Method::default(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Language resources layered on top of the built-in English defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub extra_stopwords: Vec<String>,
    pub lemma_overrides: BTreeMap<String, String>,
    pub synonyms: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedBackend {
    WordVectors,
    Transformer,
    #[default]
    Fake,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    pub backend: EmbedBackend,
    pub word_vectors_path: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// File or directory; `None` selects the built-in FAQ set.
    pub corpus_path: Option<PathBuf>,
}

/// Acceptance cutoffs must be finite and inside `[0, 1]`.
pub fn validate_threshold(threshold: f32) -> crate::Result<f32> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(Error::InvalidConfig(format!("threshold must be within [0, 1], got {threshold}")))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
