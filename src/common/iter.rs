use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every cell outside the vertical timing column in placement order as
/// `(x, y)`: two-column bands from the right edge leftwards, the first band
/// upwards, then alternating. Within a band the right cell precedes the left.
pub struct EncRegionIter {
    // Right column of the current band
    right: usize,
    // Cell index within the band
    step: usize,
    width: usize,
    upward: bool,
    done: bool,
}

const VERT_TIMING_COL: usize = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let width = version.width();
        Self { right: width - 1, step: 0, width, upward: true, done: false }
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let row = self.step >> 1;
        let y = if self.upward { self.width - 1 - row } else { row };
        let x = self.right - (self.step & 1);

        self.step += 1;
        if self.step == self.width << 1 {
            self.step = 0;
            self.upward = !self.upward;
            if self.right < 2 {
                self.done = true;
            } else {
                self.right -= 2;
                if self.right == VERT_TIMING_COL {
                    self.right -= 1;
                }
            }
        }

        Some((x, y))
    }
}
