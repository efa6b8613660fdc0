use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::config::CookieConfig;
use crate::fetchers::TranscriptFetcher;
use crate::{Result, TranscriptError};

/// Primary strategy: direct captions-API lookup via `yt-transcript-rs`
pub struct PrimaryFetcher;

impl PrimaryFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranscriptFetcher for PrimaryFetcher {
    async fn fetch(&self, video_id: &str, lang: &str, cookies: &CookieConfig) -> Result<String> {
        tracing::debug!("Primary captions lookup for {} (lang: {})", video_id, lang);

        // A fresh client per request; cookie configuration was re-read upstream
        let api = YouTubeTranscriptApi::new(cookies.file_path(), None, None)
            .map_err(|e| TranscriptError::LookupFailed(e.to_string()))?;

        let transcript = api
            .fetch_transcript(video_id, &[lang], false)
            .await
            .map_err(|e| TranscriptError::LookupFailed(e.to_string()))?;

        let text = transcript
            .snippets
            .iter()
            .map(|snippet| snippet.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        // An empty transcript counts as a failure so the caller moves on to
        // the fallback strategy
        if text.is_empty() {
            anyhow::bail!(TranscriptError::EmptyTranscript);
        }

        Ok(text)
    }
}

impl Default for PrimaryFetcher {
    fn default() -> Self {
        Self::new()
    }
}
