use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::config::{AppConfig, FileConfig, Overrides};
use portfolio_api::web;

#[derive(Parser)]
#[command(name = "portfolio-api")]
#[command(about = "GitHub project-enrichment proxy for the portfolio site")]
struct Cli {
    /// GitHub user to fetch when the request does not name one
    #[arg(long, env = "GITHUB_USER")]
    user: Option<String>,

    /// GitHub access token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Path to a portfolio.toml config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileConfig::load_from_path(path)?,
        None => FileConfig::load()?,
    };

    let config = AppConfig::from_file(
        file,
        Overrides {
            user: cli.user,
            token: cli.token,
            port: cli.port,
        },
    );

    match &config.default_user {
        Some(user) => tracing::info!("Default GitHub user: {}", user),
        None => tracing::warn!("No default GitHub user configured; requests must pass ?user="),
    }

    web::serve(config).await
}
