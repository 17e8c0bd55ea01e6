//! CDS CLI
//!
//! Command-line interface for managing actions on a CDS API.

mod commands;
mod config;
mod group_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cds")]
#[command(about = "CDS action management CLI", long_about = None)]
struct Cli {
    /// CDS API URL
    #[arg(long, env = "CDS_API_URL", default_value = "http://localhost:8081")]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "CDS_TIMEOUT", default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cds_cli=info,cds_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_url, cli.timeout);
    config.validate()?;

    tracing::debug!("Using CDS API at {}", config.api_url);

    handle_command(cli.command, &config).await
}
