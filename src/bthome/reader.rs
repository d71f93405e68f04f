/// Fixed-width little-endian integer reads for BTHome object values

/// Byte width of a BTHome object value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    One,
    Two,
    Three,
}

impl Width {
    pub const fn bytes(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Three => 3,
        }
    }

    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }
}

/// Read a little-endian integer from the start of `buf`
///
/// Signed values are two's complement on the declared bit width (8/16/24),
/// so `0xFF` read as a signed single byte becomes `-1`.
///
/// # Returns
/// None if `buf` holds fewer bytes than `width`
pub fn read_field(buf: &[u8], width: Width, signed: bool) -> Option<i32> {
    let bytes = buf.get(..width.bytes())?;

    let raw = bytes
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));

    let bits = width.bits();
    if signed && raw & (1 << (bits - 1)) != 0 {
        Some(raw as i32 - (1i32 << bits))
    } else {
        Some(raw as i32)
    }
}
