//! Sentiment lexicon
//!
//! Weighted keyword tables, phrase adjustments and the stop-word set used by
//! word-frequency aggregation. Built once at startup and shared read-only.
//!
//! The built-in tables leave out bare "good" and "bad": those only count through
//! the "not good" / "not bad" / "very good" / "very bad" phrase adjustments.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const DEFAULT_POSITIVE: &[(&str, i64)] = &[
    ("excellent", 3),
    ("amazing", 3),
    ("great", 2),
    ("love", 2),
    ("perfect", 2),
    ("awesome", 2),
    ("happy", 1),
];

const DEFAULT_NEGATIVE: &[(&str, i64)] = &[
    ("terrible", 3),
    ("awful", 3),
    ("horrible", 3),
    ("worst", 2),
    ("poor", 2),
    ("hate", 2),
    ("irritating", 1),
];

const DEFAULT_PHRASES: &[(&str, i64)] = &[
    ("not good", -2),
    ("not bad", 1),
    ("very good", 2),
    ("very bad", -2),
];

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "so", "of", "to", "in", "on", "at", "by",
    "for", "with", "from", "as", "is", "are", "was", "were", "be", "been", "it", "its",
    "it's", "this", "that", "these", "those", "i", "i'm", "me", "my", "we", "our", "you",
    "your", "he", "she", "they", "them", "their", "have", "has", "had", "do", "does",
    "did", "not", "no", "very", "just", "all", "would", "will", "can", "one", "also",
    "than", "then", "there", "what", "when", "which", "who", "about", "out", "up", "-",
];

/// Immutable lexicon shared by the scorer and the aggregator
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: Vec<(String, i64)>,
    negative: Vec<(String, i64)>,
    phrases: Vec<(String, i64)>,
    stop_words: HashSet<String>,
}

/// TOML representation of a lexicon file
///
/// ```toml
/// stop_words = ["the", "was"]
///
/// [positive]
/// great = 2
///
/// [negative]
/// awful = 3
///
/// [phrases]
/// "not good" = -2
/// ```
#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    positive: BTreeMap<String, i64>,
    #[serde(default)]
    negative: BTreeMap<String, i64>,
    phrases: Option<BTreeMap<String, i64>>,
    stop_words: Option<Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: owned_pairs(DEFAULT_POSITIVE),
            negative: owned_pairs(DEFAULT_NEGATIVE),
            phrases: owned_pairs(DEFAULT_PHRASES),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

fn owned_pairs(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
    pairs.iter().map(|(w, n)| (w.to_string(), *n)).collect()
}

impl Lexicon {
    /// Build a lexicon from explicit tables
    ///
    /// `positive` and `negative` carry weight magnitudes (must be > 0);
    /// negative words subtract their weight. Entries are case-folded, and a
    /// word may appear only once across both tables after folding.
    pub fn new<P, N, S>(positive: P, negative: N, stop_words: S) -> Result<Self>
    where
        P: IntoIterator<Item = (String, i64)>,
        N: IntoIterator<Item = (String, i64)>,
        S: IntoIterator<Item = String>,
    {
        let positive = fold_weights(positive, "positive")?;
        let negative = fold_weights(negative, "negative")?;

        if let Some((word, _)) = negative
            .iter()
            .find(|(word, _)| positive.iter().any(|(p, _)| p == word))
        {
            return Err(Error::Config(format!(
                "'{}' appears in both positive and negative tables",
                word
            )));
        }

        Ok(Self {
            positive,
            negative,
            phrases: owned_pairs(DEFAULT_PHRASES),
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    /// Replace the phrase adjustments (signed deltas, case-folded)
    pub fn with_phrases<I>(mut self, phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        self.phrases = fold_unique(phrases, "phrases")?;
        Ok(self)
    }

    /// Replace the stop-word set (case-folded)
    pub fn with_stop_words<S>(mut self, stop_words: S) -> Self
    where
        S: IntoIterator<Item = String>,
    {
        self.stop_words = stop_words.into_iter().map(|w| w.to_lowercase()).collect();
        self
    }

    /// Load a lexicon from a TOML file
    ///
    /// Missing `phrases` or `stop_words` keep the built-in values.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read lexicon {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("Lexicon {}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse a lexicon from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

        let defaults = Lexicon::default();
        let stop_words = match file.stop_words {
            Some(words) => words,
            None => defaults.stop_words.into_iter().collect(),
        };

        let mut lexicon = Lexicon::new(file.positive, file.negative, stop_words)?;
        if let Some(phrases) = file.phrases {
            lexicon = lexicon.with_phrases(phrases)?;
        }

        tracing::debug!(
            "Lexicon loaded: {} positive, {} negative, {} phrases, {} stop words",
            lexicon.positive.len(),
            lexicon.negative.len(),
            lexicon.phrases.len(),
            lexicon.stop_words.len()
        );

        Ok(lexicon)
    }

    /// Every weighted word with its signed contribution
    pub fn signed_weights(&self) -> impl Iterator<Item = (&str, i64)> {
        self.positive
            .iter()
            .map(|(w, n)| (w.as_str(), *n))
            .chain(self.negative.iter().map(|(w, n)| (w.as_str(), -*n)))
    }

    pub fn phrases(&self) -> impl Iterator<Item = (&str, i64)> {
        self.phrases.iter().map(|(p, n)| (p.as_str(), *n))
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

fn fold_weights<I>(entries: I, table: &str) -> Result<Vec<(String, i64)>>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let folded = fold_unique(entries, table)?;
    if let Some((word, weight)) = folded.iter().find(|(_, weight)| *weight <= 0) {
        return Err(Error::Config(format!(
            "{} weight for '{}' must be a positive integer, got {}",
            table, word, weight
        )));
    }
    Ok(folded)
}

/// Case-fold keys, rejecting any that collide after folding
fn fold_unique<I>(entries: I, table: &str) -> Result<Vec<(String, i64)>>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|(key, value)| {
            let folded = key.to_lowercase();
            if !seen.insert(folded.clone()) {
                return Err(Error::Config(format!(
                    "{} entry '{}' duplicates '{}' after case-folding",
                    table, key, folded
                )));
            }
            Ok((folded, value))
        })
        .collect()
}
