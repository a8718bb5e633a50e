use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use lock_core::LockController;
use tokio::{io::BufReader, sync::broadcast};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::load_settings;
use console::{pump_events, ConsoleDeviceUi};

/// Keeps the device settings menu locked behind a PIN.
///
/// UI events are read from stdin and UI commands written to stdout, one JSON
/// object per line. Logs go to stderr.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./lockd.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(args.config.as_deref())?.into_lock_settings()?;

    let (events_tx, _) = broadcast::channel(64);
    let ui = Arc::new(ConsoleDeviceUi::new(tokio::io::stdout(), events_tx.clone()));
    let mut controller = LockController::new(settings, ui);
    controller.bootstrap().await;

    let mut reader = tokio::spawn(pump_events(BufReader::new(tokio::io::stdin()), events_tx));
    let input_finished = async {
        match (&mut reader).await {
            Ok(Ok(decoded)) => info!(decoded, "ui event reader reached end of input"),
            Ok(Err(error)) => warn!(%error, "ui event reader failed"),
            Err(error) => warn!(%error, "ui event reader task failed"),
        }
    };

    tokio::select! {
        _ = controller.run_until(input_finished) => info!("controller stopped"),
        _ = tokio::signal::ctrl_c() => info!("interrupt received; stopping"),
    }

    reader.abort();
    Ok(())
}
