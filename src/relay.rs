/// Advertisement -> events pipeline
use log::{debug, trace, warn};
use thiserror::Error;

use crate::bthome::{self, DecodeError};
use crate::config::BridgeConfig;
use crate::dedup::SequenceGate;
use crate::events::{format_events, DeviceClass, EventSink};
use crate::models::RawAdvertisement;

/// Reasons an advertisement produces no events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Dropped {
    #[error("no BTHome service data")]
    NotBtHome,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("encrypted payload")]
    Encrypted,
    #[error("duplicate packet id {0}")]
    Duplicate(u8),
    #[error("unrecognised device name")]
    Unclassified,
    #[error("button held")]
    Suppressed,
}

pub struct Relay<S> {
    config: BridgeConfig,
    gate: SequenceGate,
    sink: S,
}

impl<S: EventSink> Relay<S> {
    pub fn new(config: BridgeConfig, sink: S) -> Self {
        let gate = SequenceGate::new(config.dedup_capacity);
        Self { config, gate, sink }
    }

    /// Process one advertisement and publish its events
    ///
    /// Dropped packets are logged and otherwise ignored.
    ///
    /// # Returns
    /// Number of events published
    pub fn handle(&mut self, advertisement: &RawAdvertisement) -> usize {
        match self.process(advertisement) {
            Ok(events) => {
                for event in &events {
                    self.sink.publish(event);
                }
                events.len()
            }
            Err(Dropped::Encrypted) => {
                warn!(
                    "Can't handle encrypted device {} ({})",
                    advertisement.address, advertisement.advertised_name
                );
                0
            }
            Err(reason) => {
                debug!(
                    "Dropped advertisement from {} ({}): {}",
                    advertisement.address, advertisement.advertised_name, reason
                );
                0
            }
        }
    }

    /// Decode, deduplicate, classify and format one advertisement
    pub fn process(&mut self, advertisement: &RawAdvertisement) -> Result<Vec<String>, Dropped> {
        let data = advertisement
            .service_data
            .get(&bthome::SERVICE_UUID)
            .ok_or(Dropped::NotBtHome)?;

        let payload = bthome::decode(data)?;
        if payload.encrypted {
            return Err(Dropped::Encrypted);
        }
        if let Some(stop) = payload.stopped {
            debug!(
                "Partial BTHome v{} payload from {}: {:?}",
                payload.version, advertisement.address, stop
            );
        }
        if payload.readings.is_empty() {
            debug!("No readings from {}", advertisement.address);
        } else {
            trace!(
                "{} readings from {}: {:?}",
                payload.readings.len(),
                advertisement.address,
                payload.readings.iter().collect::<Vec<_>>()
            );
        }

        let packet_id = payload.packet_id();
        if !self.gate.admit(advertisement.address, packet_id) {
            return Err(Dropped::Duplicate(packet_id.unwrap_or_default()));
        }

        let class = DeviceClass::classify(&advertisement.advertised_name);
        if class == DeviceClass::Unknown {
            return Err(Dropped::Unclassified);
        }

        let device_name = self.config.device_name(&advertisement.address);
        format_events(
            class,
            &payload.readings,
            device_name,
            &self.config.button_label,
        )
        .ok_or(Dropped::Suppressed)
    }

    #[cfg(test)]
    fn sink(&self) -> &S {
        &self.sink
    }
}
