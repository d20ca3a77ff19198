use std::ops::Deref;
use std::str::FromStr;

use super::error::{QRError, QRResult};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let mut chars = s.trim().chars();
        let c = chars.next().unwrap_or(' ');
        if chars.next().is_some() {
            return Err(QRError::InvalidECLevel(c));
        }
        match c.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel(c)),
        }
    }
}

// Block layout
//------------------------------------------------------------------------------

/// Reed-Solomon block split of the data codewords for one (version, level) pair.
///
/// Short blocks carry `data_width` data codewords, long blocks one more. Every
/// block carries `ecc_width` error correction codewords.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockLayout {
    pub short_count: usize,
    pub long_count: usize,
    pub data_width: usize,
    pub ecc_width: usize,
}

impl BlockLayout {
    const fn from_entry((s, l, d, e): (u8, u8, u8, u8)) -> Self {
        Self {
            short_count: s as usize,
            long_count: l as usize,
            data_width: d as usize,
            ecc_width: e as usize,
        }
    }

    pub const fn block_count(&self) -> usize {
        self.short_count + self.long_count
    }

    pub const fn data_capacity(&self) -> usize {
        self.data_width * self.block_count() + self.long_count
    }

    pub const fn ecc_codewords(&self) -> usize {
        self.ecc_width * self.block_count()
    }

    pub const fn total_codewords(&self) -> usize {
        self.data_capacity() + self.ecc_codewords()
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Bytes per packed matrix row.
    pub const fn stride(self) -> usize {
        (self.width() + 7) >> 3
    }

    pub fn block_layout(self, ec_level: ECLevel) -> BlockLayout {
        BlockLayout::from_entry(EC_BLOCKS[self.0 as usize - 1][ec_level as usize])
    }

    pub fn data_capacity(self, ec_level: ECLevel) -> usize {
        self.block_layout(ec_level).data_capacity()
    }

    pub fn total_codewords(self, ec_level: ECLevel) -> usize {
        self.block_layout(ec_level).total_codewords()
    }

    pub const fn length_bits(self) -> usize {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    /// Codewords taken by the mode indicator, the length field and the terminator.
    pub const fn header_overhead(self) -> usize {
        if self.0 <= 9 {
            2
        } else {
            3
        }
    }

    /// Largest payload the data stream can carry without truncation.
    pub fn max_payload(self, ec_level: ECLevel) -> usize {
        self.data_capacity(ec_level) - self.header_overhead()
    }

    pub fn alignment_delta(self) -> Option<usize> {
        match self.0 {
            1 => None,
            v => Some(ALIGNMENT_DELTA[v as usize - 2] as usize),
        }
    }

    /// 18 bit version information word, present from version 7 onwards.
    pub fn info(self) -> Option<u32> {
        match self.0 {
            0..=6 => None,
            v => Some((v as u32) << 12 | VERSION_INFO_BCH[v as usize - 7] as u32),
        }
    }

    /// Smallest version whose data stream holds `len` payload bytes untruncated.
    pub fn fitting(len: usize, ec_level: ECLevel) -> QRResult<Self> {
        Self::all()
            .find(|v| v.data_capacity(ec_level) >= len + v.header_overhead())
            .ok_or(QRError::DataTooLong { len, ec_level })
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u8> for Version {
    type Error = QRError;
    fn try_from(version: u8) -> QRResult<Self> {
        Self::new(version)
    }
}

impl FromStr for Version {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        let v = s.trim().parse::<u8>().map_err(|_| QRError::InvalidVersion(0))?;
        Self::new(v)
    }
}

// Format information
//------------------------------------------------------------------------------

pub const VERSION_INFO_BIT_LEN: usize = 18;

/// 15 bit format word for the given level and mask id, BCH bits and XOR mask included.
pub fn format_info(ec_level: ECLevel, mask: u8) -> u16 {
    FORMAT_INFO[((ec_level as usize) << 3) | (mask as usize & 7)]
}


// Global constants
//------------------------------------------------------------------------------

// (short blocks, long blocks, data codewords per short block, ecc codewords per block)
// indexed by version - 1, then L, M, Q, H
static EC_BLOCKS: [[(u8, u8, u8, u8); 4]; 40] = [
    [(1, 0, 19, 7), (1, 0, 16, 10), (1, 0, 13, 13), (1, 0, 9, 17)],
    [(1, 0, 34, 10), (1, 0, 28, 16), (1, 0, 22, 22), (1, 0, 16, 28)],
    [(1, 0, 55, 15), (1, 0, 44, 26), (2, 0, 17, 18), (2, 0, 13, 22)],
    [(1, 0, 80, 20), (2, 0, 32, 18), (2, 0, 24, 26), (4, 0, 9, 16)],
    [(1, 0, 108, 26), (2, 0, 43, 24), (2, 2, 15, 18), (2, 2, 11, 22)],
    [(2, 0, 68, 18), (4, 0, 27, 16), (4, 0, 19, 24), (4, 0, 15, 28)],
    [(2, 0, 78, 20), (4, 0, 31, 18), (2, 4, 14, 18), (4, 1, 13, 26)],
    [(2, 0, 97, 24), (2, 2, 38, 22), (4, 2, 18, 22), (4, 2, 14, 26)],
    [(2, 0, 116, 30), (3, 2, 36, 22), (4, 4, 16, 20), (4, 4, 12, 24)],
    [(2, 2, 68, 18), (4, 1, 43, 26), (6, 2, 19, 24), (6, 2, 15, 28)],
    [(4, 0, 81, 20), (1, 4, 50, 30), (4, 4, 22, 28), (3, 8, 12, 24)],
    [(2, 2, 92, 24), (6, 2, 36, 22), (4, 6, 20, 26), (7, 4, 14, 28)],
    [(4, 0, 107, 26), (8, 1, 37, 22), (8, 4, 20, 24), (12, 4, 11, 22)],
    [(3, 1, 115, 30), (4, 5, 40, 24), (11, 5, 16, 20), (11, 5, 12, 24)],
    [(5, 1, 87, 22), (5, 5, 41, 24), (5, 7, 24, 30), (11, 7, 12, 24)],
    [(5, 1, 98, 24), (7, 3, 45, 28), (15, 2, 19, 24), (3, 13, 15, 30)],
    [(1, 5, 107, 28), (10, 1, 46, 28), (1, 15, 22, 28), (2, 17, 14, 28)],
    [(5, 1, 120, 30), (9, 4, 43, 26), (17, 1, 22, 28), (2, 19, 14, 28)],
    [(3, 4, 113, 28), (3, 11, 44, 26), (17, 4, 21, 26), (9, 16, 13, 26)],
    [(3, 5, 107, 28), (3, 13, 41, 26), (15, 5, 24, 30), (15, 10, 15, 28)],
    [(4, 4, 116, 28), (17, 0, 42, 26), (17, 6, 22, 28), (19, 6, 16, 30)],
    [(2, 7, 111, 28), (17, 0, 46, 28), (7, 16, 24, 30), (34, 0, 13, 24)],
    [(4, 5, 121, 30), (4, 14, 47, 28), (11, 14, 24, 30), (16, 14, 15, 30)],
    [(6, 4, 117, 30), (6, 14, 45, 28), (11, 16, 24, 30), (30, 2, 16, 30)],
    [(8, 4, 106, 26), (8, 13, 47, 28), (7, 22, 24, 30), (22, 13, 15, 30)],
    [(10, 2, 114, 28), (19, 4, 46, 28), (28, 6, 22, 28), (33, 4, 16, 30)],
    [(8, 4, 122, 30), (22, 3, 45, 28), (8, 26, 23, 30), (12, 28, 15, 30)],
    [(3, 10, 117, 30), (3, 23, 45, 28), (4, 31, 24, 30), (11, 31, 15, 30)],
    [(7, 7, 116, 30), (21, 7, 45, 28), (1, 37, 23, 30), (19, 26, 15, 30)],
    [(5, 10, 115, 30), (19, 10, 47, 28), (15, 25, 24, 30), (23, 25, 15, 30)],
    [(13, 3, 115, 30), (2, 29, 46, 28), (42, 1, 24, 30), (23, 28, 15, 30)],
    [(17, 0, 115, 30), (10, 23, 46, 28), (10, 35, 24, 30), (19, 35, 15, 30)],
    [(17, 1, 115, 30), (14, 21, 46, 28), (29, 19, 24, 30), (11, 46, 15, 30)],
    [(13, 6, 115, 30), (14, 23, 46, 28), (44, 7, 24, 30), (59, 1, 16, 30)],
    [(12, 7, 121, 30), (12, 26, 47, 28), (39, 14, 24, 30), (22, 41, 15, 30)],
    [(6, 14, 121, 30), (6, 34, 47, 28), (46, 10, 24, 30), (2, 64, 15, 30)],
    [(17, 4, 122, 30), (29, 14, 46, 28), (49, 10, 24, 30), (24, 46, 15, 30)],
    [(4, 18, 122, 30), (13, 32, 46, 28), (48, 14, 24, 30), (42, 32, 15, 30)],
    [(20, 4, 117, 30), (40, 7, 47, 28), (43, 22, 24, 30), (10, 67, 15, 30)],
    [(19, 6, 118, 30), (18, 31, 47, 28), (34, 34, 24, 30), (20, 61, 15, 30)],
];

// Spacing between alignment pattern centres, indexed by version - 2
static ALIGNMENT_DELTA: [u8; 39] = [
    15, 19, 23, 27, 31, 16, 18, 20, 22, 24, 26, 28, 20, 22, 24, 24, 26, 28, 28, 22, 24, 24, 26,
    26, 28, 28, 24, 24, 26, 26, 26, 28, 28, 24, 26, 26, 26, 28, 28,
];

// BCH(18, 6) check bits of the version information, indexed by version - 7
static VERSION_INFO_BCH: [u16; 34] = [
    0xc94, 0x5bc, 0xa99, 0x4d3, 0xbf6, 0x762, 0x847, 0x60d, 0x928, 0xb78, 0x45d, 0xa17, 0x532,
    0x9a6, 0x683, 0x8c9, 0x7ec, 0xec4, 0x1e1, 0xfab, 0x08e, 0xc1a, 0x33f, 0xd75, 0x250, 0x9d5,
    0x6f0, 0x8ba, 0x79f, 0xb0b, 0x42e, 0xa64, 0x541, 0xc69,
];

// Format words indexed by ec level << 3 | mask
static FORMAT_INFO: [u16; 32] = [
    0x77c4, 0x72f3, 0x7daa, 0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, // L
    0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, // M
    0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed, // Q
    0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255, 0x0d0c, 0x083b, // H
];
