/// Static BTHome object table: object ID -> field layout and meaning
use super::reader::Width;

/// Decimal scale applied to the raw integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    One,
    Tenth,
    Hundredth,
}

impl Scale {
    /// Divide rather than multiply so 2345 becomes exactly 23.45
    pub fn apply(self, raw: i32) -> f64 {
        match self {
            Scale::One => f64::from(raw),
            Scale::Tenth => f64::from(raw) / 10.0,
            Scale::Hundredth => f64::from(raw) / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub width: Width,
    pub signed: bool,
    pub scale: Scale,
    pub unit: Option<&'static str>,
    /// Repeating fields get an occurrence suffix (button0, button1, ...)
    pub repeating: bool,
}

impl FieldSchema {
    const fn new(name: &'static str, width: Width, signed: bool) -> Self {
        Self {
            name,
            width,
            signed,
            scale: Scale::One,
            unit: None,
            repeating: false,
        }
    }

    const fn scaled(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    const fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }
}

/// Object ID of the packet id, used for duplicate detection
pub const PACKET_ID: u8 = 0x00;

// BTHome v2 object IDs understood by the Shelly BLU devices
static SCHEMA: [(u8, FieldSchema); 13] = [
    (PACKET_ID, FieldSchema::new("pid", Width::One, false)),
    (0x01, FieldSchema::new("battery", Width::One, false).unit("%")),
    (
        0x02,
        FieldSchema::new("temperature", Width::Two, true)
            .scaled(Scale::Hundredth)
            .unit("°C"),
    ),
    (
        0x03,
        FieldSchema::new("humidity", Width::Two, false)
            .scaled(Scale::Hundredth)
            .unit("%"),
    ),
    (
        0x05,
        FieldSchema::new("illuminance", Width::Three, false).scaled(Scale::Hundredth),
    ),
    (0x1a, FieldSchema::new("door", Width::One, false)),
    (0x20, FieldSchema::new("moisture", Width::One, false)),
    (0x21, FieldSchema::new("motion", Width::One, false)),
    (0x2d, FieldSchema::new("window", Width::One, false)),
    (0x2e, FieldSchema::new("humidity", Width::One, false).unit("%")),
    (0x3a, FieldSchema::new("button", Width::One, false).repeating()),
    (
        0x3f,
        FieldSchema::new("rotation", Width::Two, true).scaled(Scale::Tenth),
    ),
    (
        0x45,
        FieldSchema::new("temperature", Width::Two, true)
            .scaled(Scale::Tenth)
            .unit("°C"),
    ),
];

/// Look up the schema for a BTHome object ID
pub fn lookup(object_id: u8) -> Option<&'static FieldSchema> {
    SCHEMA
        .iter()
        .find(|(id, _)| *id == object_id)
        .map(|(_, schema)| schema)
}
