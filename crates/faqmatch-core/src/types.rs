//! Domain types shared by the lexical and semantic matchers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A canonical FAQ question paired with its answer.
///
/// Entries carry no id of their own: identity is the position inside the
/// owning [`Corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// Ordered, read-only collection of entries. Index `i` is the join key used
/// by every matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<Entry>,
}

impl Corpus {
    pub fn new(entries: Vec<Entry>) -> Self { Self { entries } }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Entry> { self.entries.get(index) }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> { self.entries.iter() }

    pub fn entries(&self) -> &[Entry] { &self.entries }

    pub fn questions(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.question.as_str())
    }
}

impl FromIterator<Entry> for Corpus {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// Which matching strategy answers a query.
///
/// Deserializes through [`FromStr`], so config values and JSON accept the
/// same case-insensitive tags as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Method {
    /// TF-IDF vectors over the frozen corpus vocabulary.
    #[default]
    Lexical,
    /// Sentence embeddings compared through a similarity collaborator.
    Semantic,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Lexical => "lexical",
            Method::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lexical" | "tfidf" => Ok(Method::Lexical),
            "semantic" | "spacy" => Ok(Method::Semantic),
            _ => Err(Error::UnknownMethod(tag.to_string())),
        }
    }
}

impl TryFrom<String> for Method {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self, Self::Error> { tag.parse() }
}

/// Best corpus position for a query together with its similarity.
///
/// `score` is always a finite value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub index: usize,
    pub score: f32,
}

impl Hit {
    /// Placeholder returned when nothing scores above zero.
    pub const DEGENERATE: Hit = Hit { index: 0, score: 0.0 };

    pub fn new(index: usize, score: f32) -> Self { Self { index, score: clamp_unit(score) } }

    /// Picks the maximum of `scores`; the first occurrence wins ties.
    ///
    /// The running best starts at index 0 with score 0.0 and only moves on a
    /// strictly greater score, so an all-zero input yields
    /// [`Hit::DEGENERATE`].
    pub fn first_max<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut best = Self::DEGENERATE;
        for (index, score) in scores.into_iter().enumerate() {
            let score = clamp_unit(score);
            if score > best.score {
                best = Hit { index, score };
            }
        }
        best
    }
}

/// Clips a similarity into `[0, 1]`; NaN maps to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// What a caller receives for one query.
///
/// `matched_question` and `matched_index` are `None` exactly when the
/// confidence fell below the acceptance threshold; `answer` then holds the
/// fallback message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub answer: String,
    pub confidence: f32,
    pub matched_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_index: Option<usize>,
    pub method: Method,
}

impl MatchResult {
    pub fn is_fallback(&self) -> bool { self.matched_question.is_none() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tags_and_aliases_parse() {
        assert_eq!("lexical".parse::<Method>().unwrap(), Method::Lexical);
        assert_eq!("TFIDF".parse::<Method>().unwrap(), Method::Lexical);
        assert_eq!(" semantic ".parse::<Method>().unwrap(), Method::Semantic);
        assert_eq!("spacy".parse::<Method>().unwrap(), Method::Semantic);
        let err = "bm25".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::UnknownMethod(ref t) if t == "bm25"));
    }

    #[test]
    fn method_deserializes_case_insensitively() {
        let tags: Vec<Method> = serde_json::from_str(r#"["TFIDF", "Semantic", "lexical", "SPACY"]"#).unwrap();
        assert_eq!(tags, [Method::Lexical, Method::Semantic, Method::Lexical, Method::Semantic]);
        assert!(serde_json::from_str::<Method>(r#""bm25""#).is_err());
        assert_eq!(serde_json::to_value(Method::Semantic).unwrap(), "semantic");
    }

    #[test]
    fn first_max_prefers_lowest_index_on_ties() {
        let hit = Hit::first_max([0.2, 0.7, 0.7, 0.1]);
        assert_eq!(hit, Hit { index: 1, score: 0.7 });
    }

    #[test]
    fn first_max_all_zero_is_degenerate() {
        assert_eq!(Hit::first_max([0.0, 0.0, 0.0]), Hit::DEGENERATE);
        assert_eq!(Hit::first_max(std::iter::empty()), Hit::DEGENERATE);
    }

    #[test]
    fn scores_are_clipped() {
        assert_eq!(Hit::new(3, 1.000_001).score, 1.0);
        assert_eq!(Hit::new(3, -0.4).score, 0.0);
        assert_eq!(Hit::new(3, f32::NAN).score, 0.0);
    }

    #[test]
    fn match_result_serializes_null_question_on_fallback() {
        let result = MatchResult {
            answer: "sorry".into(),
            confidence: 0.1,
            matched_question: None,
            matched_index: None,
            method: Method::Lexical,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["matched_question"].is_null());
        assert!(json.get("matched_index").is_none());
        assert_eq!(json["method"], "lexical");
    }
}
