use anyhow::Context;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::CookieConfig;
use crate::utils;
use crate::{Result, TranscriptError};

/// Resolves caption-track URLs via yt-dlp metadata extraction
pub struct CaptionResolver {
    yt_dlp_path: String,
    player_client: String,
}

impl CaptionResolver {
    pub fn new(yt_dlp_path: &str, player_client: &str) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.to_string(),
            player_client: player_client.to_string(),
        }
    }

    /// Resolve the best caption-track URL for the requested language.
    ///
    /// Manually uploaded captions win over automatically generated ones;
    /// within a catalog a `vtt` entry wins over the first entry carrying any
    /// URL.
    pub async fn resolve(
        &self,
        video_id: &str,
        lang: &str,
        cookies: &CookieConfig,
    ) -> Result<String> {
        let info = self.extract_info(video_id, cookies).await?;

        select_caption_url(&info, lang)
            .ok_or_else(|| TranscriptError::NoCaptionsFound.into())
    }

    /// Get caption metadata using yt-dlp in metadata-only mode
    async fn extract_info(&self, video_id: &str, cookies: &CookieConfig) -> Result<Value> {
        let url = utils::watch_url(video_id);
        tracing::debug!("Extracting caption metadata for: {}", url);

        let mut command = Command::new(&self.yt_dlp_path);
        command.args([
            "--dump-json",
            "--skip-download",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "--extractor-args",
        ]);
        command.arg(format!("youtube:player_client={}", self.player_client));

        if let Some(path) = cookies.file_path() {
            command.arg("--cookies").arg(path);
        } else if let Some(browser) = cookies.browser() {
            command.args(["--cookies-from-browser", browser]);
        }

        command.arg(&url);

        let output = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to run yt-dlp")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(TranscriptError::MetadataExtractionFailed(
                error.trim().to_string()
            ));
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: Value = serde_json::from_str(&json_str)
            .context("Failed to parse yt-dlp output")?;

        Ok(info)
    }
}

/// Pick a caption URL from the manual catalog first, then the automatic one
fn select_caption_url(info: &Value, lang: &str) -> Option<String> {
    let manual = info.get("subtitles").unwrap_or(&Value::Null);
    let automatic = info.get("automatic_captions").unwrap_or(&Value::Null);

    pick_caption_url(manual, lang).or_else(|| pick_caption_url(automatic, lang))
}

/// Pick a caption URL from one catalog (language code -> track entries).
///
/// A `vtt` entry with a URL wins; otherwise the first entry with a URL. An
/// absent or empty language bucket yields `None`.
fn pick_caption_url(catalog: &Value, lang: &str) -> Option<String> {
    let entries: &[Value] = match catalog.get(lang).and_then(Value::as_array) {
        Some(entries) => entries.as_slice(),
        None => &[],
    };

    entries
        .iter()
        .find(|entry| entry_format(entry) == Some("vtt") && entry_url(entry).is_some())
        .or_else(|| entries.iter().find(|entry| entry_url(entry).is_some()))
        .and_then(entry_url)
        .map(|url| url.to_string())
}

fn entry_format(entry: &Value) -> Option<&str> {
    entry.get("ext").and_then(Value::as_str)
}

fn entry_url(entry: &Value) -> Option<&str> {
    entry
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_vtt_over_first_listed_entry() {
        let catalog = json!({"en": [{"ext": "srv3", "url": "A"}, {"ext": "vtt", "url": "B"}]});
        assert_eq!(pick_caption_url(&catalog, "en"), Some("B".to_string()));
    }

    #[test]
    fn falls_back_to_first_entry_with_any_url() {
        let catalog = json!({"en": [{"ext": "srv3", "url": "A"}, {"ext": "json3", "url": "C"}]});
        assert_eq!(pick_caption_url(&catalog, "en"), Some("A".to_string()));
    }

    #[test]
    fn skips_vtt_entries_without_a_url() {
        let catalog = json!({"en": [{"ext": "vtt"}, {"ext": "srv3", "url": "A"}]});
        assert_eq!(pick_caption_url(&catalog, "en"), Some("A".to_string()));
    }

    #[test]
    fn empty_url_counts_as_absent() {
        let catalog = json!({"en": [{"ext": "vtt", "url": ""}]});
        assert_eq!(pick_caption_url(&catalog, "en"), None);
    }

    #[test]
    fn empty_and_absent_language_buckets_yield_nothing() {
        assert_eq!(pick_caption_url(&json!({"en": []}), "en"), None);
        assert_eq!(
            pick_caption_url(&json!({"de": [{"ext": "vtt", "url": "X"}]}), "en"),
            None
        );
        assert_eq!(pick_caption_url(&Value::Null, "en"), None);
    }

    #[test]
    fn manual_captions_win_over_automatic_ones() {
        let info = json!({
            "subtitles": {"en": [{"ext": "vtt", "url": "manual"}]},
            "automatic_captions": {"en": [{"ext": "vtt", "url": "auto"}]},
        });
        assert_eq!(select_caption_url(&info, "en"), Some("manual".to_string()));
    }

    #[test]
    fn automatic_captions_are_used_when_manual_ones_are_missing() {
        let info = json!({
            "subtitles": {},
            "automatic_captions": {"en": [{"ext": "srv1", "url": "auto"}]},
        });
        assert_eq!(select_caption_url(&info, "en"), Some("auto".to_string()));
    }

    #[test]
    fn empty_manual_bucket_still_reaches_the_automatic_catalog() {
        let info = json!({
            "subtitles": {"en": []},
            "automatic_captions": {"en": [{"ext": "vtt", "url": "auto"}]},
        });
        assert_eq!(select_caption_url(&info, "en"), Some("auto".to_string()));
    }

    #[test]
    fn missing_catalogs_yield_nothing() {
        assert_eq!(select_caption_url(&json!({}), "en"), None);
        assert_eq!(
            select_caption_url(&json!({"subtitles": null, "automatic_captions": null}), "en"),
            None
        );
    }
}
