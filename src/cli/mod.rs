use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "transcriptd",
    about = "Transcript Gateway - serve plain-text YouTube transcripts over HTTP",
    version,
    long_about = "An HTTP service that returns plain-text transcripts for YouTube videos. Tries a direct captions-API lookup first and falls back to resolving caption tracks via yt-dlp when the primary lookup fails or comes back empty."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the transcript HTTP service
    Serve {
        /// Bind address (overrides the configured value)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (overrides the configured value)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Show or locate the service configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}
