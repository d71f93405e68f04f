pub mod decoder;
pub mod reader;
pub mod schema;

use uuid::Uuid;

pub use decoder::{decode, DecodeError};

/// BTHome service data UUID (16-bit 0xFCD2 on the Bluetooth base UUID)
pub const SERVICE_UUID: Uuid = Uuid::from_u128(0x0000FCD2_0000_1000_8000_00805F9B34FB);
