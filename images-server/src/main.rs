//! Images Server - serves the dataset and collects classification results.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use images_common::IMAGE_COUNT;
use images_server::{loader, AppState, Cli, Config, CsvExporter, RasterCodec, Server};

const VERSION: &str = env!("CARGO_PKG_VERSION");

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli).map_err(|e| format!("Failed to load configuration: {}", e))?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting images-server {}", VERSION);

    // The dataset must be in memory before any connection is accepted.
    let dataset_path = config.dataset.path.clone();
    let dataset = tokio::task::spawn_blocking(move || loader::load_csv(&dataset_path))
        .await?
        .map_err(|e| format!("Failed to load dataset: {}", e))?;
    tracing::info!(
        "Loaded {} images from {}",
        IMAGE_COUNT,
        config.dataset.path.display()
    );

    let exporter = Arc::new(CsvExporter::new(config.export.path.clone()));
    let state = Arc::new(AppState::new(
        config.clone(),
        dataset,
        Arc::new(RasterCodec),
        exporter,
    ));

    // Start server
    let addr = config.server.bind_addr();
    let server = Server::bind(&addr, state).await?;
    tracing::info!("Listening on {}", server.local_addr()?);
    tracing::info!(
        "Open http://{}:{}/ in a web browser. Use Ctrl-C to stop.",
        config.server.host,
        config.server.port
    );

    server.run_until(shutdown_signal()).await?;
    tracing::info!("Shutting down");

    Ok(())
}
