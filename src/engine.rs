// src/engine.rs
//! # Sentiment Engine
//! Façade over the scoring core: text → NLP pipeline → annotator → aggregator → result.
//!
//! The engine owns its lexicon and pipeline and holds no per-call state, so one
//! instance can be shared (`Arc<SentimentEngine>`) across threads and calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::annotate::{Annotator, DocumentScores, EligibilityPolicy};
use crate::config::Settings;
use crate::error::SentimentError;
use crate::lexicon::LexiconStore;
use crate::nlp::{Document, NlpPipeline, RuleBasedPipeline};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSentiment {
    pub position: usize,
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "per_sentence_sentiment")]
    pub per_sentence: Vec<SentenceSentiment>,
    pub global_sentiment: f64,
}

pub struct SentimentEngine {
    lexicon: LexiconStore,
    pipeline: Box<dyn NlpPipeline>,
    policy: EligibilityPolicy,
}

impl std::fmt::Debug for SentimentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentEngine")
            .field("lexicon_sizes", &self.lexicon.sizes())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SentimentEngine {
    pub fn new(
        lexicon: LexiconStore,
        pipeline: impl NlpPipeline + 'static,
        policy: EligibilityPolicy,
    ) -> Self {
        Self {
            lexicon,
            pipeline: Box::new(pipeline),
            policy,
        }
    }

    /// Load lexicons from disk and wire the built-in pipeline.
    pub fn from_settings(settings: &Settings) -> Result<Self, SentimentError> {
        let lexicon = LexiconStore::load(&settings.lexicon_dir, &settings.language)?;
        let pipeline = RuleBasedPipeline::with_limit(settings.max_text_bytes);
        info!(
            language = %settings.language,
            lexicon_dir = %settings.lexicon_dir.display(),
            policy = ?settings.eligibility,
            "sentiment engine ready"
        );
        Ok(Self::new(lexicon, pipeline, settings.eligibility))
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn policy(&self) -> EligibilityPolicy {
        self.policy
    }

    /// Score raw text. Fails only when the pipeline cannot process it.
    pub fn compute_sentiment(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        let doc = self.pipeline.process(text)?;
        let result = self.score_document(&doc);
        debug!(
            id = %anon_hash(text),
            sentences = result.per_sentence.len(),
            tokens = doc.token_count(),
            global = result.global_sentiment,
            "text scored"
        );
        Ok(result)
    }

    /// Score an already-processed document.
    pub fn score_document(&self, doc: &Document) -> SentimentResult {
        let scores = self.annotate_document(doc);
        project(doc, &scores)
    }

    /// Token/sentence annotations with aggregates filled in.
    pub fn annotate_document(&self, doc: &Document) -> DocumentScores {
        let mut scores = Annotator::new(&self.lexicon, self.policy).annotate(doc);
        aggregate(&mut scores);
        scores
    }
}

fn project(doc: &Document, scores: &DocumentScores) -> SentimentResult {
    let per_sentence = doc
        .sentences
        .iter()
        .zip(&scores.sentences)
        .enumerate()
        .map(|(position, (sentence, s))| SentenceSentiment {
            position,
            text: sentence.text.clone(),
            score: s.sentence_score,
        })
        .collect();

    SentimentResult {
        per_sentence,
        global_sentiment: scores.global_score,
    }
}

/// Short sha256 prefix identifying a text in logs without logging the text.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
