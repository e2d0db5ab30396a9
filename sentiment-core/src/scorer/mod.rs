//! Sentiment scorer for review text.
//!
//! Two backends produce a compound polarity in roughly `[-1, 1]`:
//! - **Lexicon**: VADER-format word valences loaded from disk at startup
//! - **WordList**: built-in positive/negative word counts, used when no lexicon is found
//!
//! The backend is chosen once by [`Scorer::from_config`]; the same threshold rule
//! turns either compound into a label and confidence.

pub mod lexicon;
pub mod wordlist;

use serde::Serialize;
use thiserror::Error;

use crate::config::LexiconConfig;
use crate::models::Sentiment;

pub use lexicon::Lexicon;
pub use wordlist::WordListScorer;

/// Compound score at or beyond which text is labelled positive (or, negated, negative).
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// Words that amplify the sentiment word that follows them.
pub(crate) const INTENSIFIERS: &[&str] = &[
    "absolutely", "extremely", "incredibly", "totally", "completely", "utterly",
    "especially", "particularly", "very", "really", "so",
];

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Scoring produced a non-finite compound score ({compound})")]
    NonFiniteCompound { compound: f64 },
}

/// Label and rounded confidence for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

/// Scoring backend, selected once at startup.
#[derive(Debug, Clone)]
pub enum ScorerBackend {
    Lexicon(Lexicon),
    WordList(WordListScorer),
}

#[derive(Debug, Clone)]
pub struct Scorer {
    backend: ScorerBackend,
}

impl Scorer {
    pub fn new(backend: ScorerBackend) -> Self {
        Self { backend }
    }

    pub fn word_list() -> Self {
        Self::new(ScorerBackend::WordList(WordListScorer::new()))
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self::new(ScorerBackend::Lexicon(lexicon))
    }

    /// Use the first lexicon found on the configured search paths, else the word list.
    pub fn from_config(config: &LexiconConfig) -> Self {
        match Lexicon::discover(&config.search_paths) {
            Some((path, lexicon)) => {
                tracing::info!(
                    path = %path.display(),
                    entries = lexicon.len(),
                    "Using lexicon sentiment scorer"
                );
                Self::with_lexicon(lexicon)
            }
            None => {
                tracing::warn!(
                    search_paths = ?config.search_paths,
                    "No sentiment lexicon found, using word-list fallback scorer"
                );
                Self::word_list()
            }
        }
    }

    pub fn backend(&self) -> &ScorerBackend {
        &self.backend
    }

    /// Short backend name reported by `/health`: `vader` or `fallback`.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            ScorerBackend::Lexicon(_) => "vader",
            ScorerBackend::WordList(_) => "fallback",
        }
    }

    pub fn compound(&self, text: &str) -> f64 {
        match &self.backend {
            ScorerBackend::Lexicon(lexicon) => lexicon.compound(text),
            ScorerBackend::WordList(words) => words.compound(text),
        }
    }

    pub fn score(&self, text: &str) -> Result<Score, ScoringError> {
        let compound = self.compound(text);
        if !compound.is_finite() {
            return Err(ScoringError::NonFiniteCompound { compound });
        }
        Ok(classify(compound))
    }
}

/// Map a compound score to a label and a confidence rounded to 4 decimals.
pub fn classify(compound: f64) -> Score {
    let (sentiment, confidence) = if compound >= POLARITY_THRESHOLD {
        (Sentiment::Positive, compound.min(1.0))
    } else if compound <= -POLARITY_THRESHOLD {
        (Sentiment::Negative, compound.abs().min(1.0))
    } else {
        (Sentiment::Neutral, 1.0 - compound.abs())
    };

    Score {
        sentiment,
        confidence: round4(confidence),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Trim surrounding non-alphanumeric characters; inner apostrophes survive.
pub(crate) fn normalize_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}
