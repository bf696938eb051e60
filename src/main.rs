use clap::Parser;
use sabnzbd_exporter::config::{ConfigLoader, ConfigOverrides};
use sabnzbd_exporter::server::AppState;
use sabnzbd_exporter::{build_app, MetricsCollector, SabnzbdClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sabnzbd-exporter")]
#[command(version)]
#[command(about = "Prometheus exporter for SABnzbd", long_about = None)]
struct Cli {
    /// The address to listen on for HTTP requests. Can also set via env LISTEN_ADDRESS
    #[arg(long)]
    listen_address: Option<String>,

    /// The address for sabnzbd. Can also set via env SABNZBD_URI
    #[arg(long)]
    sabnzbd_uri: Option<String>,

    /// The api key for sabnzbd. Can also set via env SABNZBD_APIKEY
    #[arg(long)]
    sabnzbd_apikey: Option<String>,

    /// Upstream request timeout in seconds. Can also set via env SABNZBD_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Optional configuration file (JSON/YAML/TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    let cli = Cli::parse();
    env_logger::Builder::from_default_env().init();

    let overrides = ConfigOverrides {
        listen_address: cli.listen_address,
        sabnzbd_uri: cli.sabnzbd_uri,
        sabnzbd_apikey: cli.sabnzbd_apikey,
        sabnzbd_timeout_secs: cli.timeout_secs,
    };
    let config = ConfigLoader::load(cli.config.as_deref(), &overrides)?;

    log::info!("setting up sabnzbd client at {}", config.sabnzbd_uri);
    let client = SabnzbdClient::new(
        &config.sabnzbd_uri,
        config.sabnzbd_apikey.clone(),
        Duration::from_secs(config.sabnzbd_timeout_secs),
    )?;
    let state = AppState {
        collector: Arc::new(MetricsCollector::new(Arc::new(client))),
    };

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("starting server, listening at {}", addr);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down...");
}
