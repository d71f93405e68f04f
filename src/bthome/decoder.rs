/// BTHome v2 service data decoding
use log::{debug, trace};
use thiserror::Error;

use super::reader::read_field;
use super::schema;
use crate::models::{DecodeStop, DecodedPayload, Readings};

const ENCRYPTION_FLAG: u8 = 0x01;
const VERSION_SHIFT: u8 = 5;
const SUPPORTED_VERSION: u8 = 2;

/// Packet-level decode failures; nothing usable is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty BTHome service data")]
    NoPayload,
    #[error("unsupported BTHome version {0}")]
    UnsupportedVersion(u8),
}

/// Decode a BTHome v2 service data buffer into named readings
///
/// The buffer layout is:
/// - Byte 0: Device info (bit 0 = encryption, bits 5-7 = version)
/// - Then repeated objects: 1 byte object ID followed by its fixed-width value
///
/// Encrypted packets come back with `encrypted` set and no readings; nothing
/// after the header is read. Decoding stops at the first unknown object ID or
/// at a value cut short by the end of the buffer, keeping what was read so far.
///
/// # Arguments
/// * `data` - Raw service data stored under the BTHome UUID
///
/// # Returns
/// The decoded payload, or an error if the header is missing or not version 2
pub fn decode(data: &[u8]) -> Result<DecodedPayload, DecodeError> {
    let (&device_info, mut rest) = data.split_first().ok_or(DecodeError::NoPayload)?;

    let encrypted = device_info & ENCRYPTION_FLAG != 0;
    let version = device_info >> VERSION_SHIFT;
    if version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut payload = DecodedPayload {
        encrypted,
        version,
        readings: Readings::new(),
        stopped: None,
    };
    if encrypted {
        return Ok(payload);
    }

    let mut button_count = 0usize;

    while let Some((&object_id, after_id)) = rest.split_first() {
        let Some(field) = schema::lookup(object_id) else {
            debug!("Unknown BTHome object id 0x{:02x}, stopping", object_id);
            payload.stopped = Some(DecodeStop::UnknownObjectId(object_id));
            break;
        };

        let Some(raw) = read_field(after_id, field.width, field.signed) else {
            debug!(
                "BTHome object 0x{:02x} needs {} bytes, {} left",
                object_id,
                field.width.bytes(),
                after_id.len()
            );
            payload.stopped = Some(DecodeStop::TruncatedField {
                object_id,
                needed: field.width.bytes(),
                available: after_id.len(),
            });
            break;
        };

        let value = field.scale.apply(raw);
        let name = if field.repeating {
            let indexed = format!("{}{}", field.name, button_count);
            button_count += 1;
            indexed
        } else {
            field.name.to_string()
        };

        trace!("BTHome {} = {}{}", name, value, field.unit.unwrap_or(""));
        payload.readings.insert(name, value);

        rest = &after_id[field.width.bytes()..];
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_no_payload() {
        assert_eq!(decode(&[]), Err(DecodeError::NoPayload));
    }

    #[test]
    fn rejects_other_versions() {
        for version in (0u8..8).filter(|v| *v != 2) {
            let header = version << 5;
            assert_eq!(
                decode(&[header, 0x02, 0xc4, 0x09]),
                Err(DecodeError::UnsupportedVersion(version))
            );
            assert_eq!(
                decode(&[header | 0x01]),
                Err(DecodeError::UnsupportedVersion(version))
            );
        }
    }

    #[test]
    fn encrypted_payload_has_no_readings() {
        let decoded = decode(&[0x41, 0x02, 0xc4, 0x09, 0xde, 0xad]).unwrap();
        assert!(decoded.encrypted);
        assert_eq!(decoded.version, 2);
        assert!(decoded.readings.is_empty());
        assert_eq!(decoded.stopped, None);

        assert!(decode(&[0x41]).unwrap().encrypted);
    }

    #[test]
    fn header_only_is_empty_but_valid() {
        let decoded = decode(&[0x40]).unwrap();
        assert!(!decoded.encrypted);
        assert!(decoded.readings.is_empty());
        assert_eq!(decoded.stopped, None);
    }

    #[test]
    fn ignores_reserved_header_bits() {
        // Bit 2 is the trigger-based flag on Shelly BLU buttons
        let decoded = decode(&[0x44, 0x00, 0x07]).unwrap();
        assert_eq!(decoded.packet_id(), Some(7));
    }

    #[test]
    fn decodes_temperature() {
        let decoded = decode(&[0x40, 0x02, 0xc4, 0x09]).unwrap();
        assert_eq!(decoded.readings.get("temperature"), Some(25.0));
    }

    #[test]
    fn decodes_negative_scaled_values() {
        // -1.5 °C at 0.1 resolution, rotation -12.3
        let decoded = decode(&[0x40, 0x45, 0xf1, 0xff, 0x3f, 0x85, 0xff]).unwrap();
        assert_eq!(decoded.readings.get("temperature"), Some(-1.5));
        assert_eq!(decoded.readings.get("rotation"), Some(-12.3));
    }

    #[test]
    fn decodes_window_sensor_packet() {
        let decoded = decode(&[
            0x44, 0x00, 0x5b, 0x01, 0x64, 0x05, 0x40, 0x0d, 0x03, 0x2d, 0x01, 0x3f, 0x00,
            0x00,
        ])
        .unwrap();

        let readings: Vec<(&str, f64)> = decoded.readings.iter().collect();
        assert_eq!(
            readings,
            vec![
                ("pid", 91.0),
                ("battery", 100.0),
                ("illuminance", 2000.0),
                ("window", 1.0),
                ("rotation", 0.0),
            ]
        );
        assert_eq!(decoded.stopped, None);
    }

    #[test]
    fn repeated_buttons_are_indexed() {
        let decoded = decode(&[0x40, 0x3a, 0x01, 0x3a, 0x02]).unwrap();
        assert_eq!(decoded.readings.get("button0"), Some(1.0));
        assert_eq!(decoded.readings.get("button1"), Some(2.0));
        assert_eq!(decoded.readings.get("button"), None);
    }

    #[test]
    fn button_index_counts_only_buttons() {
        let decoded = decode(&[0x40, 0x00, 0x11, 0x3a, 0x00, 0x01, 0x50, 0x3a, 0xfe]).unwrap();
        let names: Vec<&str> = decoded.readings.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["pid", "button0", "battery", "button1"]);
        assert_eq!(decoded.readings.get("button1"), Some(254.0));
    }

    #[test]
    fn truncated_field_keeps_prior_readings() {
        let decoded = decode(&[0x40, 0x01, 0x55, 0x02, 0xc4]).unwrap();
        assert_eq!(decoded.readings.len(), 1);
        assert_eq!(decoded.readings.get("battery"), Some(85.0));
        assert_eq!(
            decoded.stopped,
            Some(DecodeStop::TruncatedField {
                object_id: 0x02,
                needed: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn unknown_object_id_keeps_prior_readings() {
        let decoded = decode(&[0x40, 0x00, 0x09, 0x21, 0x01, 0x04, 0x01, 0x02, 0x03, 0x2d, 0x01])
            .unwrap();
        let readings: Vec<(&str, f64)> = decoded.readings.iter().collect();
        assert_eq!(readings, vec![("pid", 9.0), ("motion", 1.0)]);
        assert_eq!(decoded.stopped, Some(DecodeStop::UnknownObjectId(0x04)));
    }
}
