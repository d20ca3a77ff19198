use crate::common::{
    arena::Arena,
    bit_utils::{msb_bits, BitGrid},
    error::QRResult,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{format_info, ECLevel, Version, VERSION_INFO_BIT_LEN},
};

// QR under construction
//------------------------------------------------------------------------------

/// Symbol frame being built: the module bitmap plus a matrix marking every
/// function pattern cell, so placement and masking leave them alone.
#[derive(Debug)]
pub struct QR<'a> {
    ver: Version,
    ecl: ECLevel,
    reserved: BitGrid<'a>,
    bitmap: BitGrid<'a>,
    mask: Option<MaskPattern>,
}

impl<'a> QR<'a> {
    pub fn new(ver: Version, ecl: ECLevel, arena: &mut Arena<'a>) -> QRResult<Self> {
        let w = ver.width();
        let sz = w * ver.stride();
        let reserved = BitGrid::new(arena.alloc_zeroed(sz)?, w);
        let bitmap = BitGrid::new(arena.alloc_zeroed(sz)?, w);
        Ok(Self { ver, ecl, reserved, bitmap, mask: None })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn bitmap(&self) -> &BitGrid<'a> {
        &self.bitmap
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bitmap.get(x, y)
    }

    pub fn is_reserved(&self, x: usize, y: usize) -> bool {
        self.reserved.get(x, y)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.bitmap.count_ones()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.width();
        let mut res = String::with_capacity(w * (w + 1) + 1);
        res.push('\n');
        for y in 0..w {
            for x in 0..w {
                let c = match (self.is_reserved(x, y), self.get(x, y)) {
                    (true, true) => 'f',
                    (true, false) => 'F',
                    (false, true) => 'd',
                    (false, false) => '.',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Marks the cell as function pattern and paints it
    fn put_func(&mut self, x: usize, y: usize, dark: bool) {
        self.reserved.set(x, y);
        self.bitmap.put(x, y, dark);
    }
}

#[cfg(test)]
pub(crate) fn with_blank_qr<R>(v: u8, ecl: ECLevel, f: impl FnOnce(&mut QR) -> R) -> R {
    let ver = Version::new(v).unwrap();
    let mut buf = vec![0; Arena::required_size(ver, ecl)];
    let mut arena = Arena::new(&mut buf);
    let mut qr = QR::new(ver, ecl, &mut arena).unwrap();
    f(&mut qr)
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR<'_> {
    fn draw_finder_patterns(&mut self) {
        let w = self.width();
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(w - 4, 3);
        self.draw_finder_pattern_at(3, w - 4);
    }

    // Draws the 7x7 pattern centred at (cx, cy) with its light separator ring,
    // clipped to the matrix
    fn draw_finder_pattern_at(&mut self, cx: usize, cy: usize) {
        let w = self.width() as isize;
        for dy in -4..=4isize {
            for dx in -4..=4isize {
                let (x, y) = (cx as isize + dx, cy as isize + dy);
                if x < 0 || y < 0 || x >= w || y >= w {
                    continue;
                }
                let dark = matches!(dx.abs().max(dy.abs()), 0 | 1 | 3);
                self.put_func(x as usize, y as usize, dark);
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

const TIMING_OFFSET: usize = 6;

impl QR<'_> {
    fn draw_timing_pattern(&mut self) {
        let w = self.width();
        for i in 8..w - 8 {
            let dark = i & 1 == 0;
            self.put_func(i, TIMING_OFFSET, dark);
            self.put_func(TIMING_OFFSET, i, dark);
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use super::with_blank_qr;
    use crate::common::metadata::ECLevel;

    #[test]
    fn test_timing_pattern_1() {
        with_blank_qr(1, ECLevel::L, |qr| {
            qr.draw_timing_pattern();
            assert_eq!(
                qr.to_debug_str(),
                "\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 ........fFfFf........\n\
                 .....................\n\
                 ......f..............\n\
                 ......F..............\n\
                 ......f..............\n\
                 ......F..............\n\
                 ......f..............\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n\
                 .....................\n"
            );
        });
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR<'_> {
    // Centres repeat every `delta` modules back from w - 7 towards the
    // timing lines. Patterns on the timing lines are skipped where they would
    // overlap a finder.
    fn draw_alignment_patterns(&mut self) {
        let Some(delta) = self.ver.alignment_delta() else {
            return;
        };
        let w = self.width();

        let mut y = w - 7;
        loop {
            let mut x = w - 7;
            while x > delta - 3 {
                self.draw_alignment_pattern_at(x, y);
                if x < delta {
                    break;
                }
                x -= delta;
            }
            if y <= delta + 9 {
                break;
            }
            y -= delta;
            self.draw_alignment_pattern_at(TIMING_OFFSET, y);
            self.draw_alignment_pattern_at(y, TIMING_OFFSET);
        }
    }

    fn draw_alignment_pattern_at(&mut self, cx: usize, cy: usize) {
        for y in cy - 2..=cy + 2 {
            for x in cx - 2..=cx + 2 {
                let d = x.abs_diff(cx).max(y.abs_diff(cy));
                self.put_func(x, y, d != 1);
            }
        }
    }
}


// Version info & dark module
//------------------------------------------------------------------------------

impl QR<'_> {
    fn draw_version_info(&mut self) {
        let Some(info) = self.ver.info() else {
            return;
        };
        let w = self.width();
        for i in 0..VERSION_INFO_BIT_LEN {
            let bit = (info >> i) & 1 == 1;
            let (a, b) = (i / 3, w - 11 + i % 3);
            self.put_func(a, b, bit);
            self.put_func(b, a, bit);
        }
    }

    fn draw_dark_module(&mut self) {
        let w = self.width();
        self.put_func(8, w - 8, true);
    }
}

// Format info
//------------------------------------------------------------------------------

impl QR<'_> {
    fn reserve_format_area(&mut self) {
        self.draw_format_info(0);
    }

    // Low byte runs along row 8 from the right edge and up column 8 from the
    // top, skipping the timing lines. High bits run down column 8 near the
    // bottom and along row 8 towards the left edge.
    fn draw_format_info(&mut self, format_info: u16) {
        let w = self.width();
        for i in 0..8 {
            let bit = (format_info >> i) & 1 == 1;
            self.put_func(w - 1 - i, 8, bit);
            self.put_func(8, if i < 6 { i } else { i + 1 }, bit);
        }
        for i in 0..7 {
            let bit = (format_info >> (8 + i)) & 1 == 1;
            self.put_func(8, w - 7 + i, bit);
            self.put_func(if i == 0 { 7 } else { 6 - i }, 8, bit);
        }
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR<'_> {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.draw_dark_module();
        self.reserve_format_area();
        self.draw_version_info();
    }

    /// Number of cells left for codewords and remainder bits.
    pub fn count_free_modules(&self) -> usize {
        let w = self.width();
        w * w - self.reserved.count_ones()
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR<'_> {
    /// Places `codewords` MSB first along the zig-zag path over every free
    /// cell. Cells past the last codeword stay light. Returns the bit count.
    pub fn draw_encoding_region(&mut self, codewords: &[u8]) -> usize {
        debug_assert!(
            codewords.len() << 3 <= self.count_free_modules(),
            "Codewords exceed the encoding region: Len {}, Free modules {}",
            codewords.len(),
            self.count_free_modules()
        );

        let reserved = &self.reserved;
        let bitmap = &mut self.bitmap;
        let coords = EncRegionIter::new(self.ver).filter(|(x, y)| !reserved.get(*x, *y));

        let mut placed = 0;
        for ((x, y), bit) in coords.zip(msb_bits(codewords)) {
            bitmap.put(x, y, bit);
            placed += 1;
        }
        debug_assert!(placed == codewords.len() << 3, "Placement path ended early: Placed {placed}");
        placed
    }

    /// Toggles every free cell whose predicate holds. Applying twice undoes it.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        let mask_fn = pattern.mask_function();
        let w = self.width();
        for y in 0..w {
            for x in 0..w {
                if mask_fn(x, y) && !self.is_reserved(x, y) {
                    self.bitmap.toggle(x, y);
                }
            }
        }
    }

    /// Applies `pattern` and writes the matching format word.
    pub fn set_mask(&mut self, pattern: MaskPattern) {
        self.apply_mask(pattern);
        self.draw_format_info(format_info(self.ecl, *pattern));
        self.mask = Some(pattern);
    }
}
