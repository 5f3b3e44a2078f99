// src/error.rs
//! Error taxonomy for the scoring library.
//!
//! Scoring itself is total: every lexicon miss has a neutral default and every
//! aggregation has an empty-input result. Failures therefore only come from
//! construction (lexicon files, settings) or from the NLP pipeline collaborator.

use std::path::PathBuf;

/// Fatal, construction-time failure while reading a lexicon resource file.
#[derive(Debug, thiserror::Error)]
pub enum LexiconLoadError {
    #[error("lexicon file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon file {path} is malformed at line {line}: {source}")]
    Csv {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("lexicon file {path}, line {line}: expected 2 columns (key, weight), found {found}")]
    ColumnCount {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    #[error("lexicon file {path}, line {line}: weight '{raw}' is not a number")]
    InvalidWeight {
        path: PathBuf,
        line: u64,
        raw: String,
    },
}

/// The NLP pipeline could not turn the input text into a document.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input text is {size} bytes, above the pipeline limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("NLP pipeline unavailable: {message}")]
    Unavailable { message: String },
}

impl PipelineError {
    pub fn unavailable(message: &str) -> Self {
        Self::Unavailable {
            message: message.to_string(),
        }
    }
}

/// Umbrella error returned by the engine façade.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("lexicon load failed: {0}")]
    Lexicon(#[from] LexiconLoadError),

    #[error("text processing failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SentimentError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
