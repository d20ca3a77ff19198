//! Bump allocator backing every buffer of an encode.
//!
//! One encode needs a handful of byte buffers whose sizes are fixed once the
//! version is known: the two packed matrices, the data stream, the ecc
//! region, the generator polynomial, the interleaved codewords and the run
//! length scratch used by mask scoring. [`Arena::required_size`] reports the
//! exact sum, so a caller can reserve one buffer up front and encode without
//! touching the allocator again.
//!
//! ```
//! use qrbits::{Arena, ECLevel, QRBuilder, Version};
//!
//! let version = Version::new(2).unwrap();
//! let mut buffer = vec![0u8; Arena::required_size(version, ECLevel::L)];
//! let mut arena = Arena::new(&mut buffer);
//! let symbol = QRBuilder::new(b"Hello, world!")
//!     .version(version)
//!     .ec_level(ECLevel::L)
//!     .build_in(&mut arena)
//!     .unwrap();
//! assert_eq!(symbol.width(), 25);
//! assert_eq!(arena.remaining(), 0);
//! ```
//!
//! Allocations are never reclaimed. To reuse the buffer drop the arena along
//! with every slice it handed out and wrap the buffer again.

use std::mem;

use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

pub struct Arena<'a> {
    // Unallocated tail of the caller's buffer
    rest: &'a mut [u8],
    capacity: usize,
}

impl<'a> Arena<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let capacity = buffer.len();
        Self { rest: buffer, capacity }
    }

    /// Hands out the next `len` bytes, zero filled.
    pub fn alloc_zeroed(&mut self, len: usize) -> QRResult<&'a mut [u8]> {
        let remaining = self.rest.len();
        if len > remaining {
            return Err(QRError::ArenaExhausted { requested: len, remaining });
        }

        let (head, tail) = mem::take(&mut self.rest).split_at_mut(len);
        self.rest = tail;
        head.fill(0);
        Ok(head)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn used(&self) -> usize {
        self.capacity - self.rest.len()
    }

    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Exact number of bytes one encode at `version` and `ec_level` allocates.
    pub fn required_size(version: Version, ec_level: ECLevel) -> usize {
        let width = version.width();
        let layout = version.block_layout(ec_level);

        // Reserved and bitmap matrices
        let matrices = 2 * width * version.stride();
        // Data stream, ecc region and interleaved codewords
        let streams = layout.data_capacity() + layout.ecc_codewords() + layout.total_codewords();
        let generator = layout.ecc_width + 1;
        let runs = width + 1;

        matrices + streams + generator + runs
    }
}
