use bluer::Address;
use std::collections::HashMap;
use uuid::Uuid;

/// One received advertisement, as handed over by the scanner
#[derive(Debug, Clone)]
pub struct RawAdvertisement {
    pub address: Address,
    pub advertised_name: String,
    pub service_data: HashMap<Uuid, Vec<u8>>,
}

/// Decoded readings in the order they appeared in the packet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    entries: Vec<(String, f64)>,
}

impl Readings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading; a name seen earlier in the packet keeps its position
    /// but takes the newer value.
    pub fn insert(&mut self, name: String, value: f64) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why the decoder stopped before the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStop {
    UnknownObjectId(u8),
    TruncatedField {
        object_id: u8,
        needed: usize,
        available: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    pub encrypted: bool,
    pub version: u8,
    pub readings: Readings,
    /// Set when decoding ended early; readings before that point are kept
    pub stopped: Option<DecodeStop>,
}

impl DecodedPayload {
    /// Packet id reading, if the packet carried one
    pub fn packet_id(&self) -> Option<u8> {
        self.readings.get("pid").map(|pid| pid as u8)
    }
}
