//! Part-of-speech agnostic lemmatization.
//!
//! The default [`EnglishLemmatizer`] resolves irregular forms through a table
//! and reduces everything else with tantivy's English (Porter2) stemmer.
//! Corpus questions and queries pass through the same reduction, so `secured`
//! and `secure` (or `settings` and `setting`) end up as the same term even
//! when that term is not a dictionary word.

use std::collections::HashMap;

use tantivy::tokenizer::{Language, RawTokenizer, Stemmer, TextAnalyzer, TokenStream};

/// Maps a lower-cased token to its base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Forms a suffix stemmer cannot relate to their base.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("ran", "run"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("paid", "pay"),
    ("bought", "buy"),
    ("sent", "send"),
    ("made", "make"),
    ("got", "get"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("done", "do"),
    ("said", "say"),
    ("kept", "keep"),
    ("left", "leave"),
    ("lost", "lose"),
    ("found", "find"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("began", "begin"),
    ("begun", "begin"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("brought", "bring"),
    ("built", "build"),
    ("sold", "sell"),
    ("told", "tell"),
    ("wrote", "write"),
    ("written", "write"),
    ("spent", "spend"),
    ("understood", "understand"),
    ("came", "come"),
    ("became", "become"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
];

/// A single Porter2 pass is not idempotent (`purchase -> purchas -> purcha`).
const MAX_STEM_PASSES: usize = 4;

/// Irregular-form table (with caller-supplied overrides) followed by Porter2
/// stemming of the resulting base form.
#[derive(Clone)]
pub struct EnglishLemmatizer {
    forms: HashMap<String, String>,
    stemmer: TextAnalyzer,
}

impl std::fmt::Debug for EnglishLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishLemmatizer").field("forms", &self.forms.len()).finish()
    }
}

impl Default for EnglishLemmatizer {
    fn default() -> Self { Self::new() }
}

impl EnglishLemmatizer {
    pub fn new() -> Self {
        let forms = IRREGULAR.iter().map(|(form, lemma)| (form.to_string(), lemma.to_string())).collect();
        let stemmer = TextAnalyzer::builder(RawTokenizer::default())
            .filter(Stemmer::new(Language::English))
            .build();
        Self { forms, stemmer }
    }

    /// Adds or replaces irregular forms; overrides win over the built-in table.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (form, lemma) in overrides {
            self.forms.insert(form.as_ref().to_lowercase(), lemma.as_ref().to_lowercase());
        }
        self
    }

    fn stem_once(&self, word: &str) -> String {
        let mut analyzer = self.stemmer.clone();
        let mut stream = analyzer.token_stream(word);
        if stream.advance() {
            stream.token().text.clone()
        } else {
            word.to_string()
        }
    }

    fn stem(&self, word: &str) -> String {
        let mut current = word.to_string();
        for _ in 0..MAX_STEM_PASSES {
            let next = self.stem_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        let base = self.forms.get(token).map(String::as_str).unwrap_or(token);
        // digits, accents and mixed tokens are left alone
        if !base.chars().all(|c| c.is_ascii_lowercase()) {
            return base.to_string();
        }
        self.stem(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String { EnglishLemmatizer::new().lemmatize(word) }

    #[test]
    fn inflections_agree_with_their_base_form() {
        let families: &[&[&str]] = &[
            &["secure", "secured", "securing", "secures"],
            &["change", "changed", "changing", "changes"],
            &["delete", "deleted", "deleting"],
            &["share", "shared", "sharing"],
            &["store", "stored", "storing"],
            &["decline", "declined"],
            &["movie", "movies"],
            &["cache", "caches", "cached"],
            &["setting", "settings"],
            &["meeting", "meetings"],
            &["saving", "savings"],
            &["warning", "warnings"],
            &["booking", "bookings"],
            &["policy", "policies"],
            &["charge", "charged", "charging"],
            &["apply", "applied", "applies"],
            &["ship", "shipped", "shipping"],
            &["purchase", "purchased", "purchases", "purchasing"],
            &["update", "updated", "updating"],
        ];
        let lemmatizer = EnglishLemmatizer::new();
        for family in families {
            let base = lemmatizer.lemmatize(family[0]);
            for form in &family[1..] {
                assert_eq!(lemmatizer.lemmatize(form), base, "{form} vs {}", family[0]);
            }
        }
    }

    #[test]
    fn lemmatizing_twice_changes_nothing() {
        let lemmatizer = EnglishLemmatizer::new();
        for word in [
            "settings", "setting", "meetings", "savings", "secured", "business", "policies", "purchases",
            "subscription", "analysis", "physics", "children", "went", "hours", "running", "canvas", "data",
        ] {
            let once = lemmatizer.lemmatize(word);
            assert_eq!(lemmatizer.lemmatize(&once), once, "{word}");
        }
    }

    #[test]
    fn common_terms() {
        assert_eq!(lemma("hours"), "hour");
        assert_eq!(lemma("running"), "run");
        assert_eq!(lemma("tracking"), "track");
        assert_eq!(lemma("opened"), "open");
        assert_eq!(lemma("orders"), "order");
        assert_eq!(lemma("refunds"), "refund");
        assert_eq!(lemma("business"), "busi");
    }

    #[test]
    fn irregular_forms_use_the_table() {
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("went"), lemma("go"));
        assert_eq!(lemma("goes"), lemma("go"));
        assert_eq!(lemma("paid"), lemma("paying"));
        assert_eq!(lemma("mice"), lemma("mouse"));
        assert_eq!(lemma("written"), lemma("writing"));
    }

    #[test]
    fn short_and_non_ascii_tokens_pass_through() {
        assert_eq!(lemma("ad"), "ad");
        assert_eq!(lemma("café"), "café");
        assert_eq!(lemma("256bit"), "256bit");
        assert_eq!(lemma("news"), "news");
    }

    #[test]
    fn overrides_take_precedence() {
        let lemmatizer = EnglishLemmatizer::new().with_overrides([("data", "datum"), ("Hours", "time")]);
        assert_eq!(lemmatizer.lemmatize("data"), "datum");
        assert_eq!(lemmatizer.lemmatize("hours"), "time");
        assert_eq!(lemmatizer.lemmatize("minutes"), lemmatizer.lemmatize("minute"));
    }
}
