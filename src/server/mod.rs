use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::{Config, CookieConfig};
use crate::fetchers::{FallbackFetcher, PrimaryFetcher, TranscriptFetcher};
use crate::Result;

/// Query parameters accepted by the transcript endpoint
#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    #[serde(rename = "videoId")]
    pub video_id: String,

    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

/// Response body of the transcript endpoint.
///
/// Failures are reported in-body; the endpoint itself always answers 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub success: bool,

    #[serde(rename = "videoId")]
    pub video_id: String,

    pub transcript: Option<String>,

    pub error: Option<String>,
}

impl TranscriptResult {
    /// Create a success response
    pub fn fetched(video_id: String, transcript: String) -> Self {
        Self {
            success: true,
            video_id,
            transcript: Some(transcript),
            error: None,
        }
    }

    /// Create a failure response
    pub fn failed(video_id: String, error: String) -> Self {
        Self {
            success: false,
            video_id,
            transcript: None,
            error: Some(error),
        }
    }
}

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    primary: Arc<dyn TranscriptFetcher>,
    fallback: Arc<dyn TranscriptFetcher>,
}

impl AppState {
    /// Wire up the default fetch strategies from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            primary: Arc::new(PrimaryFetcher::new()),
            fallback: Arc::new(FallbackFetcher::new(&config.fetch)?),
        })
    }

    /// Build a state from explicit strategies
    pub fn with_fetchers(
        primary: Arc<dyn TranscriptFetcher>,
        fallback: Arc<dyn TranscriptFetcher>,
    ) -> Self {
        Self { primary, fallback }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/transcript", get(transcript_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the server (blocks until shutdown)
pub async fn run(addr: &str, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Transcript service listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "ok"
}

/// Transcript endpoint: primary captions-API lookup with a yt-dlp fallback.
///
/// Each strategy runs at most once. Every failure path is folded into a
/// `success: false` body rather than an error status.
async fn transcript_handler(
    State(state): State<AppState>,
    Query(query): Query<TranscriptQuery>,
) -> Json<TranscriptResult> {
    tracing::info!(
        "Transcript request for video {} (lang: {})",
        query.video_id,
        query.lang
    );

    // Cookie configuration is re-read on every request
    let cookies = CookieConfig::from_env();

    let primary_err = match state.primary.fetch(&query.video_id, &query.lang, &cookies).await {
        Ok(text) => return Json(TranscriptResult::fetched(query.video_id, text)),
        Err(err) => err,
    };

    tracing::warn!(
        "Primary transcript lookup failed for {}: {}",
        query.video_id,
        primary_err
    );

    match state.fallback.fetch(&query.video_id, &query.lang, &cookies).await {
        Ok(text) => Json(TranscriptResult::fetched(query.video_id, text)),
        Err(fallback_err) => {
            tracing::warn!(
                "Fallback transcript fetch failed for {}: {}",
                query.video_id,
                fallback_err
            );
            Json(TranscriptResult::failed(
                query.video_id,
                format!("{} | fallback: {}", primary_err, fallback_err),
            ))
        }
    }
}
