use tracing::warn;

use super::{
    bit_utils::BitStream,
    metadata::{ECLevel, Version},
};

// Byte mode data stream
//------------------------------------------------------------------------------

pub const BYTE_MODE: u8 = 0b0100;

const MODE_BITS: usize = 4;

const TERMINATOR_BITS: usize = 4;

const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Writes the data stream of `data` into `out`, which must hold exactly the
/// data capacity of `version` at `ec_level`. Payloads longer than the
/// capacity allows are truncated. Returns the number of payload bytes kept.
pub fn encode(data: &[u8], version: Version, ec_level: ECLevel, out: &mut [u8]) -> usize {
    let capacity = version.data_capacity(ec_level);
    debug_assert!(
        out.len() == capacity,
        "Stream buffer doesn't match data capacity: Len {}, Capacity {capacity}",
        out.len()
    );

    let limit = version.max_payload(ec_level);
    let len = data.len().min(limit);
    if len < data.len() {
        warn!(
            version = *version,
            ?ec_level,
            len = data.len(),
            kept = len,
            "Payload exceeds version capacity, truncating"
        );
    }

    let mut bs = BitStream::new(out);
    push_header(len, version, &mut bs);
    bs.extend(&data[..len]);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug_assert!(bs.len() == bs.capacity(), "Data stream must fill its capacity");
    len
}

fn push_header(len: usize, version: Version, out: &mut BitStream) {
    let len_bits = version.length_bits();
    debug_assert!(
        len < (1 << len_bits),
        "Char count exceeds bit length: Char count {len}, Char count bits {len_bits}"
    );

    out.push_bits(BYTE_MODE, MODE_BITS);
    out.push_bits(len as u16, len_bits);
}

fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(TERMINATOR_BITS, bit_capacity - bit_len);
        out.push_bits(0u8, term_len);
    }
}

fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    debug_assert!(out.len() & 7 == 0, "Bit offset should be zero before padding codewords");

    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
