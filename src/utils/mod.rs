use anyhow::Result;
use url::Url;

/// Build the canonical watch-page URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/watch?v={}",
        urlencoding::encode(video_id)
    )
}

/// Validate a resolved caption-track URL before downloading it
pub fn validate_caption_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| anyhow::anyhow!("Invalid caption URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("Caption URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}

/// Check if the current environment has required external tools
pub async fn check_dependencies(yt_dlp_path: &str) -> Vec<String> {
    let mut missing = Vec::new();

    // The primary captions-API path works without yt-dlp; only the fallback
    // needs it
    if !check_command_available(yt_dlp_path).await {
        missing.push(format!(
            "{} - required for the caption-track fallback",
            yt_dlp_path
        ));
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            watch_url("a b&c"),
            "https://www.youtube.com/watch?v=a%20b%26c"
        );
    }

    #[test]
    fn test_validate_caption_url() {
        assert!(validate_caption_url("https://example.com/caps.vtt").is_ok());
        assert!(validate_caption_url("http://example.com/caps.vtt").is_ok());
        assert!(validate_caption_url("ftp://example.com/caps.vtt").is_err());
        assert!(validate_caption_url("not-a-url").is_err());
    }
}
