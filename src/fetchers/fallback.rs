use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

use crate::config::{CookieConfig, FetchConfig};
use crate::fetchers::resolver::CaptionResolver;
use crate::fetchers::TranscriptFetcher;
use crate::utils;
use crate::vtt;
use crate::{Result, TranscriptError};

/// Fallback strategy: resolve a caption-track URL via yt-dlp, download the
/// caption file, and strip it down to plain text
pub struct FallbackFetcher {
    resolver: CaptionResolver,
    client: reqwest::Client,
}

impl FallbackFetcher {
    pub fn new(fetch: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(fetch.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            resolver: CaptionResolver::new(&fetch.yt_dlp_path, &fetch.player_client),
            client,
        })
    }

    /// Download a caption file and reduce it to plain text.
    ///
    /// A single attempt; no retries.
    async fn download_captions(&self, caption_url: &str) -> Result<String> {
        let url = utils::validate_caption_url(caption_url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Caption download request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(TranscriptError::CaptionDownloadFailed(status.to_string()));
        }

        let body = response
            .text()
            .await
            .context("Failed to read caption file body")?;

        Ok(vtt::clean_vtt(&body))
    }
}

#[async_trait]
impl TranscriptFetcher for FallbackFetcher {
    async fn fetch(&self, video_id: &str, lang: &str, cookies: &CookieConfig) -> Result<String> {
        let caption_url = self.resolver.resolve(video_id, lang, cookies).await?;
        tracing::debug!("Resolved caption track for {}: {}", video_id, caption_url);

        self.download_captions(&caption_url).await
    }
}
