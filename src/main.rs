mod command;
mod config;
mod poller;
mod shutdown;
mod storage;
mod transport;

use anyhow::Result;
use config::PollerConfig;
use poller::Poller;
use shutdown::ShutdownSignal;
use std::path::PathBuf;
use transport::SerialTransport;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = PollerConfig::load(config_path.as_deref())?;

    info!("Modem poller starting on {}", config.serial.port);
    info!(
        "  Signal logs: {}/NN.{} ({} files)",
        config.storage.dir.display(),
        config.storage.extension,
        config.storage.file_count
    );

    let mut shutdown = ShutdownSignal::install()?;

    if let Err(e) = storage::collect_garbage(&config.storage.dir, &config.storage.extension).await {
        warn!("Failed to clean {}: {}", config.storage.dir.display(), e);
    }

    let mut transport = SerialTransport::open(config.serial.settings())?;
    let mut poller = Poller::new(&config);

    poller.run(&mut transport, &mut shutdown).await;

    transport.close();
    Ok(())
}
