// src/api.rs
//! HTTP surface: `POST /sentimentanalysis` plus root, health and metrics.
//!
//! Request validation happens here, before the engine is called:
//! non-JSON content type → 415, undecodable body → 400, missing `text` → 422.
//! Engine failures are reported as 500 with the underlying message.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use tracing::{debug, error, warn};

use crate::config::Settings;
use crate::engine::{anon_hash, SentimentEngine};
use crate::metrics::{record_request, record_scoring, Metrics};

pub const ROOT_MESSAGE: &str = "Everything is working fine";
pub const INCORRECT_MIMETYPE: &str = "Incorrect mimetype, must be 'application/json'.";
pub const MISSING_TEXT: &str = "'text' attribute not present in request body";
pub const METHOD_NOT_ALLOWED: &str = "The method is not allowed for the requested URL.";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SentimentEngine>,
}

impl AppState {
    pub fn new(engine: SentimentEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Resolve settings and load the engine (lexicons are read here, once).
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let engine = SentimentEngine::from_settings(settings)?;
        Ok(Self::new(engine))
    }
}

pub fn create_router(state: AppState) -> Router {
    let metrics = Metrics::init(state.engine.lexicon());

    Router::new()
        .route("/", get(root).fallback(method_not_allowed))
        .route("/health", get(|| async { "ok" }).fallback(method_not_allowed))
        .route(
            "/sentimentanalysis",
            post(sentiment_analysis).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
        .merge(metrics.router())
        .layer(CorsLayer::very_permissive())
}

/// Alias kept for callers that build the router by its short name.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

type ApiError = (StatusCode, String);

async fn root() -> &'static str {
    ROOT_MESSAGE
}

async fn sentiment_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let resp = match score_request(&state, &headers, &body).await {
        Ok(result) => reply(StatusCode::OK, result),
        Err((status, message)) => reply(status, Value::String(message)),
    };
    record_request(resp.status().as_u16());
    resp
}

async fn score_request(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    if !is_json(headers) {
        warn!("rejected request with non-JSON content type");
        return Err((StatusCode::UNSUPPORTED_MEDIA_TYPE, INCORRECT_MIMETYPE.to_string()));
    }

    let payload: Value = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "rejected undecodable JSON body");
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to decode JSON object: {e}"),
        )
    })?;

    let text = match payload.get("text") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "'text' attribute must be a string".to_string(),
            ))
        }
        None => return Err((StatusCode::UNPROCESSABLE_ENTITY, MISSING_TEXT.to_string())),
    };

    let id = anon_hash(&text);
    let engine = Arc::clone(&state.engine);
    let started = Instant::now();

    // Scoring is synchronous CPU work; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || engine.compute_sentiment(&text))
        .await
        .map_err(internal)?
        .map_err(internal)?;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    record_scoring(elapsed_ms, result.per_sentence.len());
    debug!(
        %id,
        sentences = result.per_sentence.len(),
        global = result.global_sentiment,
        elapsed_ms,
        "sentiment request served"
    );

    serde_json::to_value(&result).map_err(internal)
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    error!(error = %e, "sentiment request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("500. Handled Internal Server Error: {e}"),
    )
}

pub(crate) async fn method_not_allowed() -> Response {
    reply(
        StatusCode::METHOD_NOT_ALLOWED,
        Value::String(METHOD_NOT_ALLOWED.to_string()),
    )
}

async fn not_found() -> Response {
    reply(
        StatusCode::NOT_FOUND,
        Value::String("404. The requested URL was not found on the server.".to_string()),
    )
}

/// `{"result": body}` on 200, `{"error": body}` otherwise.
fn reply(status: StatusCode, body: Value) -> Response {
    let key = if status == StatusCode::OK { "result" } else { "error" };
    let mut map = Map::new();
    map.insert(key.to_string(), body);
    (status, Json(Value::Object(map))).into_response()
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(raw) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
