/// Bluetooth Low Energy scanning for Shelly BLU advertisements
use bluer::{Adapter, AdapterEvent, Address};
use futures_util::{pin_mut, StreamExt};
use log::{debug, error, info, warn};
use tokio::time::{sleep, Duration};

use crate::events::EventSink;
use crate::models::RawAdvertisement;
use crate::relay::Relay;

const RESTART_DELAY_SECS: u64 = 5; // Pause before restarting a failed discovery

/// Open the default adapter and prepare it for LE discovery
///
/// Duplicate advertisement reporting is enabled so every new packet from a
/// known beacon is seen; repeats are filtered by packet id instead.
pub async fn open_adapter() -> Result<Adapter, Box<dyn std::error::Error>> {
    // Initialize Bluetooth session
    let session = match bluer::Session::new().await {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to create Bluetooth session: {}", e);
            return Err(e.into());
        }
    };

    // Get the default Bluetooth adapter
    let adapter = match session.default_adapter().await {
        Ok(adapter) => adapter,
        Err(e) => {
            error!("Failed to get default Bluetooth adapter: {}", e);
            return Err(e.into());
        }
    };

    // Ensure Bluetooth adapter is powered on
    if let Err(e) = adapter.set_powered(true).await {
        error!("Failed to power on adapter: {}", e);
        return Err(e.into());
    }

    let filter = bluer::DiscoveryFilter {
        transport: bluer::DiscoveryTransport::Le, // Bluetooth Low Energy only
        duplicate_data: true,                     // Report every advertisement
        ..Default::default()
    };

    // Apply the discovery filter (warn if it fails, but continue)
    if let Err(e) = adapter.set_discovery_filter(filter).await {
        warn!("Failed to set discovery filter: {}", e);
    }

    info!("Using Bluetooth adapter {}", adapter.name());
    Ok(adapter)
}

/// Snapshot the advertised name and service data of a device
///
/// # Returns
/// None for devices that advertise no name or no service data
async fn read_advertisement(
    adapter: &Adapter,
    address: Address,
) -> bluer::Result<Option<RawAdvertisement>> {
    let device = adapter.device(address)?;

    let Some(advertised_name) = device.name().await? else {
        return Ok(None);
    };
    let Some(service_data) = device.service_data().await? else {
        return Ok(None);
    };

    Ok(Some(RawAdvertisement {
        address,
        advertised_name,
        service_data,
    }))
}

/// Feed advertisements into the relay until the task is cancelled
///
/// Each advertisement is handled to completion before the next one is read.
/// If discovery fails or its stream ends, it is restarted after a short pause.
pub async fn run_scanner<S: EventSink>(adapter: &Adapter, relay: &mut Relay<S>) {
    loop {
        match adapter.discover_devices_with_changes().await {
            Ok(events) => {
                info!("Discovery started on {}", adapter.name());
                pin_mut!(events);

                while let Some(event) = events.next().await {
                    let AdapterEvent::DeviceAdded(address) = event else {
                        continue;
                    };

                    match read_advertisement(adapter, address).await {
                        Ok(Some(advertisement)) => {
                            let published = relay.handle(&advertisement);
                            if published > 0 {
                                debug!("Published {} events for {}", published, address);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            debug!("Failed to read advertisement from {}: {}", address, e);
                        }
                    }
                }

                warn!("Discovery stream ended");
            }
            Err(e) => {
                error!("Failed to start device discovery: {}", e);
            }
        }

        sleep(Duration::from_secs(RESTART_DELAY_SECS)).await;
    }
}
