use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// Append-only MSB-first bit writer over a zero filled byte buffer.
#[derive(Debug)]
pub struct BitStream<'a> {
    data: &'a mut [u8],
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        debug_assert!(data.iter().all(|b| *b == 0), "Bit stream buffer must be zero filled");
        let capacity = data.len() << 3;
        Self { data, len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream<'_> {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Bit count exceeds the width of the value: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }

        self.len += 1;
    }

    pub fn extend(&mut self, arr: &[u8]) {
        let offset = self.len & 7;
        let arr_bits = arr.len() << 3;
        debug_assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );

        if offset == 0 {
            let pos = self.len >> 3;
            self.data[pos..pos + arr.len()].copy_from_slice(arr);
            self.len += arr_bits;
        } else {
            arr.iter().for_each(|b| self.push_bits(*b, 8));
        }
    }
}

/// Bits of `data`, most significant bit of each byte first.
pub fn msb_bits(data: &[u8]) -> impl Iterator<Item = bool> + '_ {
    data.iter().flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1 == 1))
}


// Bit grid
//------------------------------------------------------------------------------

/// Square bit matrix, row-major, MSB-first within each byte, rows padded to
/// a whole number of bytes. Padding bits are never set.
#[derive(Debug)]
pub struct BitGrid<'a> {
    bits: &'a mut [u8],
    width: usize,
    stride: usize,
}

impl<'a> BitGrid<'a> {
    pub fn new(bits: &'a mut [u8], width: usize) -> Self {
        let stride = (width + 7) >> 3;
        debug_assert!(
            bits.len() == width * stride,
            "Grid buffer doesn't match its width: Len {}, Width {width}",
            bits.len()
        );
        Self { bits, width, stride }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        debug_assert!(
            x < self.width && y < self.width,
            "Out of grid bounds: Width {}, X {x}, Y {y}",
            self.width
        );
        (y * self.stride + (x >> 3), 0b10000000 >> (x & 7))
    }
}

// Get & set for bit grid
//------------------------------------------------------------------------------

impl BitGrid<'_> {
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (i, mask) = self.locate(x, y);
        self.bits[i] & mask != 0
    }

    pub fn set(&mut self, x: usize, y: usize) {
        let (i, mask) = self.locate(x, y);
        self.bits[i] |= mask;
    }

    pub fn put(&mut self, x: usize, y: usize, bit: bool) {
        let (i, mask) = self.locate(x, y);
        self.bits[i] &= !mask;
        if bit {
            self.bits[i] |= mask;
        }
    }

    pub fn toggle(&mut self, x: usize, y: usize) {
        let (i, mask) = self.locate(x, y);
        self.bits[i] ^= mask;
    }
}
