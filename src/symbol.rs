use crate::{
    builder::QR,
    common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    },
};

// Finished symbol
//------------------------------------------------------------------------------

/// Encoded symbol, owning its packed module matrix.
///
/// Rows are `stride` bytes long, the module at column `x` of row `y` is bit
/// `0x80 >> (x % 8)` of byte `y * stride + x / 8`, and a set bit is dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    width: usize,
    bits: Vec<u8>,
    // Payload bytes kept after truncation
    encoded_len: usize,
}

impl Symbol {
    pub(crate) fn new(qr: &QR, mask: MaskPattern, encoded_len: usize) -> Self {
        Self {
            version: qr.version(),
            ec_level: qr.ec_level(),
            mask,
            width: qr.width(),
            bits: qr.bitmap().as_bytes().to_vec(),
            encoded_len,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn stride(&self) -> usize {
        (self.width + 7) >> 3
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    /// Number of payload bytes the symbol carries. Smaller than the input
    /// only when a fixed version forced truncation.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(
            x < self.width && y < self.width,
            "Out of symbol bounds: Width {}, X {x}, Y {y}",
            self.width
        );
        self.bits[y * self.stride() + (x >> 3)] & (0b10000000 >> (x & 7)) != 0
    }

    pub fn count_dark_modules(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.version, self.ec_level, *self.mask)
    }
}
