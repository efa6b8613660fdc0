use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming a cookie-jar file passed to both fetch strategies
pub const COOKIES_PATH_VAR: &str = "TRANSCRIPT_COOKIES_PATH";

/// Environment variable naming a browser whose stored cookies the fallback may use
pub const COOKIES_BROWSER_VAR: &str = "TRANSCRIPT_COOKIES_BROWSER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Transcript fetch settings
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Path to the yt-dlp binary used for caption metadata extraction
    pub yt_dlp_path: String,

    /// Player client profile passed through yt-dlp's extractor arguments
    pub player_client: String,

    /// Timeout for the caption-file download, in seconds
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            player_client: "android".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("transcript-gateway").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.fetch.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("yt-dlp path must not be empty");
        }

        if self.fetch.http_timeout_secs == 0 {
            anyhow::bail!("Caption download timeout must be at least one second");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Bind Address: {}:{}", self.server.host, self.server.port);
        println!("  yt-dlp Path: {}", self.fetch.yt_dlp_path);
        println!("  Player Client: {}", self.fetch.player_client);
        println!("  Caption Download Timeout: {}s", self.fetch.http_timeout_secs);
    }
}

/// Cookie credentials passed through to the fetch strategies.
///
/// Read fresh from the environment on every request; blank values count as
/// unset.
#[derive(Debug, Clone, Default)]
pub struct CookieConfig {
    file: Option<PathBuf>,
    browser: Option<String>,
}

impl CookieConfig {
    /// Read cookie configuration from the environment
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(COOKIES_PATH_VAR).ok(),
            env::var(COOKIES_BROWSER_VAR).ok(),
        )
    }

    fn from_values(path: Option<String>, browser: Option<String>) -> Self {
        Self {
            file: path
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            browser: browser.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Cookie-jar file passed to both fetch strategies
    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Browser whose stored cookies the fallback strategy may use.
    ///
    /// A configured cookie file takes precedence; the browser is only
    /// reported when no file is set.
    pub fn browser(&self) -> Option<&str> {
        if self.file.is_some() {
            None
        } else {
            self.browser.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_blank_yt_dlp_path_is_rejected() {
        let mut config = Config::default();
        config.fetch.yt_dlp_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.fetch.http_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_cookie_values_count_as_unset() {
        let cookies = CookieConfig::from_values(Some("  ".to_string()), Some(String::new()));
        assert!(cookies.file_path().is_none());
        assert!(cookies.browser().is_none());
    }

    #[test]
    fn test_browser_is_ignored_when_a_cookie_file_is_set() {
        let cookies = CookieConfig::from_values(
            Some("/tmp/cookies.txt".to_string()),
            Some("firefox".to_string()),
        );
        assert_eq!(cookies.file_path(), Some(Path::new("/tmp/cookies.txt")));
        assert!(cookies.browser().is_none());
    }

    #[test]
    fn test_browser_applies_without_a_cookie_file() {
        let cookies = CookieConfig::from_values(None, Some("chrome".to_string()));
        assert!(cookies.file_path().is_none());
        assert_eq!(cookies.browser(), Some("chrome"));
    }
}
