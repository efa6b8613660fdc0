use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_gateway::cli::{Cli, Commands};
use transcript_gateway::config::Config;
use transcript_gateway::server::{self, AppState};
use transcript_gateway::utils;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "transcript_gateway=debug"
    } else {
        "transcript_gateway=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Serve { host, port } => {
            // Missing yt-dlp is not fatal; only the fallback path needs it
            let missing_deps = utils::check_dependencies(&config.fetch.yt_dlp_path).await;
            for dep in missing_deps {
                tracing::warn!("Missing external tool: {}", dep);
            }

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(&config)?;

            server::run(&format!("{}:{}", host, port), state).await?;
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                println!("Configuration file:");
                println!("  {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
