//! Transcript Gateway - an HTTP service that fetches YouTube video transcripts
//!
//! This library provides a two-path retrieval strategy: a direct captions-API
//! lookup first, then a fallback that resolves caption-track URLs via yt-dlp,
//! downloads the caption file, and strips WebVTT markup down to plain text.

pub mod cli;
pub mod config;
pub mod fetchers;
pub mod server;
pub mod utils;
pub mod vtt;

pub use cli::{Cli, Commands};
pub use config::{Config, CookieConfig};
pub use fetchers::{FallbackFetcher, PrimaryFetcher, TranscriptFetcher};
pub use server::{AppState, TranscriptResult};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error kinds raised by the transcript fetch strategies
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Transcript lookup failed: {0}")]
    LookupFailed(String),

    #[error("Empty transcript from primary API")]
    EmptyTranscript,

    #[error("No captions found for requested language")]
    NoCaptionsFound,

    #[error("Caption download failed: HTTP {0}")]
    CaptionDownloadFailed(String),

    #[error("Caption metadata extraction failed: {0}")]
    MetadataExtractionFailed(String),
}
