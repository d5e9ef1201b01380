use anyhow::Result;
use axum::{extract::{DefaultBodyLimit, State}, http::StatusCode, routing::{get, post}, Json, Router};
use docsift_core::{highlight_with, clean_text, search, snippet, validate_query, Error, IndexCache, VectorizerConfig, SNIPPET_CHARS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    #[default]
    Markdown,
    Html,
}

impl Marker {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Marker::Markdown => ("**", "**"),
            Marker::Html => ("<em>", "</em>"),
        }
    }
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub documents: Vec<String>,
    pub query: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub full_text: bool,
    #[serde(default)]
    pub marker: Marker,
}
fn default_top_n() -> usize { 5 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub num_docs: usize,
    /// Results with a non-zero score.
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub doc_id: u32,
    pub score: f32,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub vectorizer: VectorizerConfig,
    pub cache_capacity: usize,
    pub max_body_bytes: usize,
}

/// Request body limit in bytes for a limit given in MiB.
pub fn body_limit_bytes(max_body_mb: usize) -> Result<usize> {
    max_body_mb
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("body limit of {max_body_mb} MiB is too large"))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { vectorizer: VectorizerConfig::default(), cache_capacity: 16, max_body_bytes: 32 * 1024 * 1024 }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<IndexCache>,
    pub vectorizer: VectorizerConfig,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    config.vectorizer.validate()?;
    let app_state = AppState { cache: Arc::new(IndexCache::new(config.cache_capacity)), vectorizer: config.vectorizer };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", post(search_handler))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Json(req): Json<SearchRequest>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    validate_query(&req.query).map_err(error_response)?;
    // Rank and highlight with the query as typed
    let query = req.query.clone();
    if req.documents.is_empty() {
        return Err(error_response(Error::EmptyCorpus));
    }

    // Index build and ranking are CPU-bound; keep them off the async workers
    let response = tokio::task::spawn_blocking(move || -> Result<SearchResponse, (StatusCode, String)> {
        let index = state.cache.get_or_build(&req.documents, &state.vectorizer).map_err(error_response)?;
        let top_n = req.top_n.clamp(1, 10);
        let (open, close) = req.marker.tags();
        let results: Vec<SearchHit> = search(&index, &query, top_n)
            .into_iter()
            .enumerate()
            .map(|(i, r)| SearchHit {
                rank: i + 1,
                doc_id: r.doc_id,
                score: r.score,
                snippet: highlight_with(&snippet(r.text, SNIPPET_CHARS), &query, open, close),
                full_text: req.full_text.then(|| highlight_with(&clean_text(r.text), &query, open, close)),
            })
            .collect();
        let total_hits = results.iter().filter(|h| h.score > 0.0).count();
        let elapsed = start.elapsed();
        Ok(SearchResponse { query, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), num_docs: index.num_docs(), total_hits, results })
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("search task failed: {e}")))??;

    tracing::info!(query = %response.query, num_docs = response.num_docs, total_hits = response.total_hits, "search served");
    Ok(Json(response))
}

fn error_response(err: Error) -> (StatusCode, String) {
    match err {
        Error::InvalidQuery => (StatusCode::BAD_REQUEST, "Please enter a search query.".into()),
        Error::EmptyCorpus => (StatusCode::BAD_REQUEST, "No text extracted from the uploaded documents.".into()),
        Error::EmptyVocabulary(_) | Error::InvalidConfig(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, format!("Error processing documents: {err}"))
        }
    }
}
