// src/annotate.rs
//! # Token Annotator
//!
//! Writes per-token weights into an annotation arena that runs parallel to the
//! pipeline's `Document` (sentence `i`, token `j` ↔ `scores.sentences[i].tokens[j]`).
//! The document itself is never mutated.
//!
//! Pass A assigns base polarity (and the self-booster) to eligible tokens found
//! in the sentiment lexicon. Pass B lets negators and boosters act on the
//! nearest sentiment-bearing token of the same sentence, probing offsets
//! `+1, -1, +2, -2, ...`. A later negator overwrites an earlier one on the same
//! target; booster weights accumulate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::lexicon::LexiconStore;
use crate::nlp::shape::uppercase_shape_ratio;
use crate::nlp::{Document, PartOfSpeech, Sentence, Token};

/// Uppercase-shape share above which a token counts as emphatic.
pub const SELF_BOOST_SHAPE_RATIO: f64 = 0.8;
/// Minimum run of one repeated char that counts as elongation ("buenísssimo").
pub const SELF_BOOST_MIN_RUN: usize = 3;
pub const SELF_BOOST_WEIGHT: f64 = 1.0;

/// Which tokens may receive a base polarity in Pass A.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityPolicy {
    /// Any token whose stem is in the lexicon.
    #[default]
    AnyToken,
    /// Only adjectives that are not stop words.
    AdjectiveNonStop,
}

impl EligibilityPolicy {
    pub fn admits(self, token: &Token) -> bool {
        match self {
            Self::AnyToken => true,
            Self::AdjectiveNonStop => token.pos == PartOfSpeech::Adj && !token.is_stop,
        }
    }
}

impl FromStr for EligibilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "any_token" | "any" => Ok(Self::AnyToken),
            "adjective_non_stop" | "adjective" | "adj" => Ok(Self::AdjectiveNonStop),
            other => Err(format!("unknown eligibility policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenScores {
    pub sentiment_weight: f64,
    /// `1.0`, or `-w` once negated by a negator of weight `w`.
    pub negation_weight: f64,
    pub booster_weight: f64,
}

impl Default for TokenScores {
    fn default() -> Self {
        Self {
            sentiment_weight: 0.0,
            negation_weight: 1.0,
            booster_weight: 0.0,
        }
    }
}

impl TokenScores {
    #[inline]
    pub fn is_sentiment_bearing(&self) -> bool {
        self.sentiment_weight != 0.0
    }

    /// Signed polarity after negation, before boosting/clamping.
    #[inline]
    pub fn effective(&self) -> f64 {
        self.sentiment_weight * self.negation_weight
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceScores {
    pub sentence_score: f64,
    pub tokens: Vec<TokenScores>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentScores {
    pub sentences: Vec<SentenceScores>,
    pub global_score: f64,
}

impl DocumentScores {
    /// Fresh arena with default weights, shaped like `doc`.
    pub fn for_document(doc: &Document) -> Self {
        Self {
            sentences: doc
                .sentences
                .iter()
                .map(|s| SentenceScores {
                    sentence_score: 0.0,
                    tokens: vec![TokenScores::default(); s.len()],
                })
                .collect(),
            global_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    lexicon: &'a LexiconStore,
    policy: EligibilityPolicy,
}

impl<'a> Annotator<'a> {
    pub fn new(lexicon: &'a LexiconStore, policy: EligibilityPolicy) -> Self {
        Self { lexicon, policy }
    }

    /// Run Pass A then Pass B over every sentence of `doc`.
    pub fn annotate(&self, doc: &Document) -> DocumentScores {
        let mut scores = DocumentScores::for_document(doc);
        for (sentence, sent_scores) in doc.sentences.iter().zip(scores.sentences.iter_mut()) {
            self.assign_base_sentiment(sentence, &mut sent_scores.tokens);
            self.propagate_modifiers(sentence, &mut sent_scores.tokens);
        }
        scores
    }

    /// Pass A.
    pub fn assign_base_sentiment(&self, sentence: &Sentence, scores: &mut [TokenScores]) {
        for (token, ts) in sentence.tokens.iter().zip(scores.iter_mut()) {
            if !self.policy.admits(token) {
                continue;
            }
            let weight = self.lexicon.lookup_sentiment(&token.stem);
            if weight != 0.0 {
                ts.sentiment_weight = weight;
                ts.booster_weight = self_booster(token);
            }
        }
    }

    /// Pass B. Expects Pass A to have run on the same sentence.
    pub fn propagate_modifiers(&self, sentence: &Sentence, scores: &mut [TokenScores]) {
        for (i, token) in sentence.tokens.iter().enumerate() {
            if let Some(negation) = self.lexicon.lookup_negator(&token.lower) {
                if let Some(target) = influenced_index(scores, i) {
                    trace!(trigger = %token.text, target, negation, "negation applied");
                    scores[target].negation_weight = -negation;
                }
            } else if let Some(boost) = self.lexicon.lookup_booster(&token.lower) {
                if let Some(target) = influenced_index(scores, i) {
                    trace!(trigger = %token.text, target, boost, "booster applied");
                    scores[target].booster_weight += boost;
                }
            }
        }
    }
}

/// Nearest sentiment-bearing token to `from`, probing `+1, -1, +2, -2, ...`.
pub fn influenced_index(scores: &[TokenScores], from: usize) -> Option<usize> {
    let len = scores.len();
    (1..len)
        .flat_map(|d| [from.checked_add(d), from.checked_sub(d)])
        .flatten()
        .find(|&idx| idx < len && scores[idx].is_sentiment_bearing())
}

/// `1.0` when the token is written emphatically (mostly uppercase shape, or a
/// char repeated at least three times in a row), else `0.0`.
pub fn self_booster(token: &Token) -> f64 {
    let emphatic_case = uppercase_shape_ratio(&token.text, &token.shape) > SELF_BOOST_SHAPE_RATIO;
    if emphatic_case || max_repeated_run(&token.lower) >= SELF_BOOST_MIN_RUN {
        SELF_BOOST_WEIGHT
    } else {
        0.0
    }
}

/// Longest run of one repeated char.
pub fn max_repeated_run(s: &str) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<char> = None;
    for ch in s.chars() {
        run = if Some(ch) == prev { run + 1 } else { 1 };
        prev = Some(ch);
        best = best.max(run);
    }
    best
}
