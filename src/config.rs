use bluer::Address;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::env;

const DEFAULT_BUTTON_LABEL: &str = "rc4_001_button";
const DEFAULT_DEDUP_CAPACITY: usize = 32;
const UNKNOWN_DEVICE_NAME: &str = "undefined";

/// Where formatted events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutput {
    Stdout,
    Log,
}

impl EventOutput {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(EventOutput::Stdout),
            "log" => Ok(EventOutput::Log),
            other => Err(format!(
                "Invalid BLU_EVENT_OUTPUT '{}', expected 'stdout' or 'log'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Uppercase MAC -> friendly device name
    pub devices: HashMap<String, String>,
    pub button_label: String,
    pub dedup_capacity: usize,
    pub output: EventOutput,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            devices: HashMap::new(),
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
            output: EventOutput::Stdout,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        let mut config = BridgeConfig::default();

        // Try BLU_DEVICES format first
        if let Ok(blu_devices) = env::var("BLU_DEVICES") {
            debug!("Found BLU_DEVICES: '{}'", blu_devices);
            config.devices = parse_device_list(&blu_devices);
        } else {
            // Fallback to individual environment variables
            debug!("BLU_DEVICES environment variable not found, trying individual variables");
            for (key, value) in env::vars() {
                if let Some(index) = key
                    .strip_prefix("BLU_DEVICE_")
                    .and_then(|s| s.strip_suffix("_MAC"))
                {
                    let name_key = format!("BLU_DEVICE_{}_NAME", index);
                    if let Ok(name) = env::var(&name_key) {
                        config.devices.insert(value.trim().to_uppercase(), name);
                    }
                }
            }
        }

        info!("Total devices named: {}", config.devices.len());
        for (mac, name) in &config.devices {
            debug!("Device: {} -> {}", mac, name);
        }

        if config.devices.is_empty() {
            warn!(
                "No device names configured, events will use '{}'. Set BLU_DEVICES or BLU_DEVICE_<N>_MAC/BLU_DEVICE_<N>_NAME",
                UNKNOWN_DEVICE_NAME
            );
        }

        if let Ok(label) = env::var("BLU_BUTTON_LABEL") {
            let label = label.trim();
            if label.is_empty() {
                return Err("BLU_BUTTON_LABEL must not be empty".into());
            }
            config.button_label = label.to_string();
        }

        if let Ok(capacity) = env::var("BLU_DEDUP_CAPACITY") {
            config.dedup_capacity = capacity
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|c| *c > 0)
                .ok_or_else(|| {
                    format!(
                        "Invalid BLU_DEDUP_CAPACITY '{}', expected a positive number",
                        capacity
                    )
                })?;
        }

        if let Ok(output) = env::var("BLU_EVENT_OUTPUT") {
            config.output = EventOutput::parse(&output)?;
        }

        Ok(config)
    }

    /// Friendly name for an address, or "undefined" if it is not configured
    pub fn device_name(&self, address: &Address) -> &str {
        self.devices
            .get(&address.to_string().to_uppercase())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DEVICE_NAME)
    }
}

/// Parse `mac=name,mac=name` pairs, skipping malformed entries
fn parse_device_list(list: &str) -> HashMap<String, String> {
    let mut devices = HashMap::new();

    for pair in list.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        if let Some((mac, name)) = pair.split_once('=') {
            let mac = mac.trim();
            let name = name.trim();
            if !mac.is_empty() && !name.is_empty() {
                devices.insert(mac.to_uppercase(), name.to_string());
            }
        } else {
            warn!("Failed to split device pair: '{}'", pair);
        }
    }

    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_pairs() {
        let devices =
            parse_device_list("60:ef:ab:44:44:e6=voordeur, 3c:2e:f5:72:72:27 = schuifraam,");
        assert_eq!(devices.len(), 2);
        assert_eq!(devices["60:EF:AB:44:44:E6"], "voordeur");
        assert_eq!(devices["3C:2E:F5:72:72:27"], "schuifraam");
    }

    #[test]
    fn skips_malformed_pairs() {
        let devices = parse_device_list("novalue,=name,aa:bb:cc:dd:ee:ff=,b0:c7:de:40:fd:45=motion_bs");
        assert_eq!(devices.len(), 1);
        assert_eq!(devices["B0:C7:DE:40:FD:45"], "motion_bs");
    }

    #[test]
    fn device_name_lookup() {
        let config = BridgeConfig {
            devices: parse_device_list("38:39:8f:71:01:18=ht_matthias"),
            ..Default::default()
        };

        let known = Address::new([0x38, 0x39, 0x8f, 0x71, 0x01, 0x18]);
        let unknown = Address::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(config.device_name(&known), "ht_matthias");
        assert_eq!(config.device_name(&unknown), "undefined");
    }

    #[test]
    fn event_output_parsing() {
        assert_eq!(EventOutput::parse("stdout"), Ok(EventOutput::Stdout));
        assert_eq!(EventOutput::parse(" LOG "), Ok(EventOutput::Log));
        assert!(EventOutput::parse("udp").is_err());
    }

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.button_label, "rc4_001_button");
        assert_eq!(config.dedup_capacity, 32);
        assert_eq!(config.output, EventOutput::Stdout);
    }
}
