mod bluetooth;
mod bthome;
mod config;
mod dedup;
mod events;
mod models;
mod relay;
mod utils;

use log::{error, info};

use bluetooth::scanner::{open_adapter, run_scanner};
use config::{BridgeConfig, EventOutput};
use events::{EventSink, LogSink, StdoutSink};
use relay::Relay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match BridgeConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let sink: Box<dyn EventSink> = match config.output {
        EventOutput::Stdout => Box::new(StdoutSink),
        EventOutput::Log => Box::new(LogSink),
    };

    let adapter = open_adapter().await?;
    let mut relay = Relay::new(config, sink);

    info!("Starting Shelly BLU event relay");

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        let _ = tx.send(());
    });

    // Relay advertisements until a shutdown signal arrives
    tokio::select! {
        _ = run_scanner(&adapter, &mut relay) => {
            error!("Scanner stopped unexpectedly");
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
