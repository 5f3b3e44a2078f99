// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod annotate;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod nlp;

// ---- Re-exports for stable public API ----
pub use crate::annotate::{DocumentScores, EligibilityPolicy, SentenceScores, TokenScores};
pub use crate::api::{create_router, router, AppState};
pub use crate::config::Settings;
pub use crate::engine::{SentenceSentiment, SentimentEngine, SentimentResult};
pub use crate::error::{LexiconLoadError, PipelineError, SentimentError};
pub use crate::lexicon::LexiconStore;
pub use crate::nlp::{Document, NlpPipeline, PartOfSpeech, RuleBasedPipeline, Sentence, Token};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber honouring `RUST_LOG` (default `sentileak=info,warn`).
/// `SENTILEAK_LOG_FORMAT=json` switches to JSON lines. No-op if one is already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentileak=info,warn"));

    let json = std::env::var("SENTILEAK_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };
}
