use async_trait::async_trait;

pub mod fallback;
pub mod primary;
pub mod resolver;

pub use fallback::FallbackFetcher;
pub use primary::PrimaryFetcher;
pub use resolver::CaptionResolver;

use crate::config::CookieConfig;
use crate::Result;

/// Trait for transcript fetch strategies
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch a plain-text transcript for a video in the requested language.
    ///
    /// Any error, including an empty result where the strategy treats it as
    /// one, is reported through `Err`; the caller decides whether another
    /// strategy gets a turn.
    async fn fetch(&self, video_id: &str, lang: &str, cookies: &CookieConfig) -> Result<String>;
}
