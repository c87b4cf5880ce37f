use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use signage_cli::format::{self, OutputFormat};
use signage_cli::viewer;
use signage_core::{ClientConfig, HttpOverviewClient, OverviewApi, RefreshConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "signage-dashboard")]
#[command(about = "Interactive digital-signage analytics dashboard")]
struct Cli {
    /// Backend origin; in production the dashboard sits behind the same
    /// reverse proxy as the backend.
    #[arg(long, default_value = "http://localhost:8080")]
    backend: String,

    #[arg(long, default_value = "/api")]
    api_prefix: String,

    #[arg(long, default_value_t = 30_000)]
    refresh_ms: u64,

    /// Fetch a single snapshot, print it and exit.
    #[arg(long)]
    once: bool,

    /// Output format for --once.
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        origin: cli.backend,
        api_prefix: cli.api_prefix,
    };
    let client = HttpOverviewClient::new(&config);
    info!(endpoint = %client.endpoint(), "starting dashboard surface");

    if cli.once {
        let snapshot = client.fetch_overview().await?;
        format::print_snapshot(&snapshot, cli.format)?;
        return Ok(());
    }

    let refresh = RefreshConfig {
        refresh_interval: Duration::from_millis(cli.refresh_ms),
        ..RefreshConfig::default()
    };

    viewer::run_viewer(&client, &refresh).await
}
