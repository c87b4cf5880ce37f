use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use signage_cli::slideshow;
use signage_core::{ClientConfig, HttpOverviewClient, RefreshConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "signage-slideshow")]
#[command(about = "Unattended digital-signage analytics slideshow")]
struct Cli {
    /// Backend origin; in production the slideshow sits behind the same
    /// reverse proxy as the backend.
    #[arg(long, default_value = "http://localhost:8080")]
    backend: String,

    #[arg(long, default_value = "/api")]
    api_prefix: String,

    #[arg(long, default_value_t = 60_000)]
    refresh_ms: u64,

    /// How long each slide stays on screen.
    #[arg(long, default_value_t = 8_000)]
    dwell_ms: u64,
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
    info!(endpoint = %client.endpoint(), "starting slideshow surface");

    let refresh = RefreshConfig {
        refresh_interval: Duration::from_millis(cli.refresh_ms),
        slide_dwell: Duration::from_millis(cli.dwell_ms),
    };

    slideshow::run_slideshow(&client, &refresh).await
}
