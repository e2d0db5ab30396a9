//! Word-list fallback scorer.
//!
//! Counts hits against fixed positive and negative word sets, with a half-point
//! bonus when the preceding token is an intensifier, and normalizes by token count.

use std::collections::HashSet;

use super::{normalize_token, INTENSIFIERS};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "excellent", "amazing", "love", "best", "fantastic",
    "wonderful", "brilliant", "outstanding", "superb", "perfect", "enjoyed", "liked",
    "beautiful", "masterpiece", "impressive", "incredible", "favorite", "recommend",
    "enjoyable", "pleasantly", "surprised",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "poor", "hate", "worst", "boring", "horrible",
    "disappointing", "waste", "rubbish", "stupid", "dull", "annoying", "hated", "dislike",
    "unfortunately", "weak", "mess", "confusing", "predictable", "cliche", "pointless",
];

const INTENSIFIER_BONUS: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct WordListScorer {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
}

impl Default for WordListScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl WordListScorer {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Net polarity: `positive/total - negative/total`, or 0 for no tokens.
    pub fn compound(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().map(normalize_token).collect();
        if tokens.is_empty() {
            return 0.0;
        }

        let mut positive = 0.0;
        let mut negative = 0.0;

        for (i, word) in tokens.iter().enumerate() {
            let boosted = i > 0 && self.intensifiers.contains(tokens[i - 1]);

            if self.positive.contains(word) {
                positive += 1.0;
                if boosted {
                    positive += INTENSIFIER_BONUS;
                }
            }

            if self.negative.contains(word) {
                negative += 1.0;
                if boosted {
                    negative += INTENSIFIER_BONUS;
                }
            }
        }

        let total = tokens.len() as f64;
        positive / total - negative / total
    }
}
