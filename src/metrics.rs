use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::api::method_not_allowed;
use crate::lexicon::LexiconStore;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process and publish lexicon sizes.
    pub fn init(lexicon: &LexiconStore) -> Self {
        let handle = HANDLE
            .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
                Ok(h) => h,
                Err(e) => {
                    // Another recorder owns the process; keep a detached one for rendering.
                    warn!(error = %e, "prometheus recorder not installed");
                    PrometheusBuilder::new().build_recorder().handle()
                }
            })
            .clone();

        let (words, boosters, negators) = lexicon.sizes();
        gauge!("sentileak_lexicon_entries", "lexicon" => "sentiment_words").set(words as f64);
        gauge!("sentileak_lexicon_entries", "lexicon" => "boosters").set(boosters as f64);
        gauge!("sentileak_lexicon_entries", "lexicon" => "negations").set(negators as f64);

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            })
            .fallback(method_not_allowed),
        )
    }
}

/// Count one `/sentimentanalysis` response by status code.
pub fn record_request(status: u16) {
    counter!("sentileak_requests_total", "status" => status.to_string()).increment(1);
}

pub fn record_scoring(duration_ms: f64, sentences: usize) {
    histogram!("sentileak_scoring_duration_ms").record(duration_ms);
    histogram!("sentileak_sentences_per_request").record(sentences as f64);
}
