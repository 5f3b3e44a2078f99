// src/nlp/mod.rs
//! Read-only document model produced by an NLP pipeline, plus the pipeline seam.
//!
//! The scoring core never mutates these types; its own per-call state lives in
//! a parallel annotation arena (see `crate::annotate`).

pub mod pipeline;
pub mod shape;
pub mod stopwords;


use crate::error::PipelineError;

pub use pipeline::RuleBasedPipeline;
pub use shape::word_shape;

/// Universal POS tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Surface text as it appears in the input.
    pub text: String,
    pub lemma: String,
    /// Lexicon lookup key derived from the lemma.
    pub stem: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub lower: String,
    /// Orthographic shape, e.g. `Xxxxx`, `dd.dd`.
    pub shape: String,
}

impl Token {
    /// Build a token whose derived fields (lower, shape) come from `text`.
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        stem: impl Into<String>,
        pos: PartOfSpeech,
        is_stop: bool,
    ) -> Self {
        let text = text.into();
        Self {
            lower: text.to_lowercase(),
            shape: word_shape(&text),
            lemma: lemma.into(),
            stem: stem.into(),
            pos,
            is_stop,
            text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

/// External text-processing collaborator: tokenization, sentence splitting,
/// lemmatization, stemming, POS tagging and stop-word flags.
pub trait NlpPipeline: Send + Sync {
    fn process(&self, text: &str) -> Result<Document, PipelineError>;
}
