use std::ops::Deref;

use tracing::trace;

use super::{
    bit_utils::BitGrid,
    error::{QRError, QRResult},
};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern(0),
        MaskPattern(1),
        MaskPattern(2),
        MaskPattern(3),
        MaskPattern(4),
        MaskPattern(5),
        MaskPattern(6),
        MaskPattern(7),
    ];

    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern(pattern)),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QRError;
    fn try_from(pattern: u8) -> QRResult<Self> {
        Self::new(pattern)
    }
}

// Predicates take the column first. A true result flips the cell.
mod mask_functions {
    pub fn checkerboard(x: usize, y: usize) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: usize, y: usize) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: usize, _: usize) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: usize, y: usize) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: usize, y: usize) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: usize, y: usize) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: usize, y: usize) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: usize, y: usize) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(usize, usize) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores all eight masks, applies the lowest scoring one along with its
/// format word and returns it. Ties go to the lowest mask id. Scores are taken
/// with the format strips blank. `runs` is scratch space of `width + 1`.
pub fn apply_best_mask(qr: &mut QR, runs: &mut [u8]) -> MaskPattern {
    let best_mask = MaskPattern::ALL
        .into_iter()
        .min_by_key(|m| {
            qr.apply_mask(*m);
            let penalty = compute_total_penalty(qr.bitmap(), runs);
            qr.apply_mask(*m);
            trace!(mask = **m, penalty, "Scored mask");
            penalty
        })
        .unwrap_or(MaskPattern(0));
    qr.set_mask(best_mask);
    best_mask
}

// Penalty scoring
//------------------------------------------------------------------------------

pub fn compute_total_penalty(grid: &BitGrid, runs: &mut [u8]) -> u32 {
    let w = grid.width();
    debug_assert!(runs.len() > w, "Run buffer too small: Len {}, Width {w}", runs.len());

    let mut pen = compute_block_penalty(grid);
    for y in 0..w {
        let h = collect_runs((0..w).map(|x| grid.get(x, y)), runs);
        pen += compute_run_penalty(&runs[..=h]);
    }
    for x in 0..w {
        let h = collect_runs((0..w).map(|y| grid.get(x, y)), runs);
        pen += compute_run_penalty(&runs[..=h]);
    }
    pen + compute_balance_penalty(grid)
}

// Stores alternating run lengths into `runs`, starting with a light run that
// may be empty, so odd indices hold dark runs. Returns the last index used.
fn collect_runs(cells: impl Iterator<Item = bool>, runs: &mut [u8]) -> usize {
    let mut h = 0;
    let mut last = false;
    runs[0] = 0;
    for dark in cells {
        if dark != last {
            h += 1;
            runs[h] = 0;
            last = dark;
        }
        runs[h] += 1;
    }
    h
}

fn compute_run_penalty(runs: &[u8]) -> u32 {
    let h = runs.len() - 1;
    let r = |i: usize| runs[i] as u32;

    let mut pen: u32 = runs.iter().filter(|l| **l >= 5).map(|l| *l as u32 - 2).sum();

    // Dark 1:1:3:1:1 run with light space on one side
    for i in (3..h.saturating_sub(1)).step_by(2) {
        let unit = r(i - 1);
        if r(i - 2) == unit
            && r(i + 1) == unit
            && r(i + 2) == unit
            && unit * 3 == r(i)
            && (r(i - 3) == 0 || i + 3 > h || r(i - 3) * 3 >= r(i) * 4 || r(i + 3) * 3 >= r(i) * 4)
        {
            pen += 40;
        }
    }
    pen
}

fn compute_block_penalty(grid: &BitGrid) -> u32 {
    let mut pen = 0;
    let w = grid.width();
    for y in 0..w - 1 {
        for x in 0..w - 1 {
            let clr = grid.get(x, y);
            if clr == grid.get(x + 1, y) && clr == grid.get(x, y + 1) && clr == grid.get(x + 1, y + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 10 points per full w*w of ten times the dark/light imbalance, not counting
// an exact multiple
fn compute_balance_penalty(grid: &BitGrid) -> u32 {
    let w = grid.width();
    let tot = w * w;
    let dark = grid.count_ones();
    let imbalance = dark.abs_diff(tot - dark) * 10;
    match imbalance {
        0 => 0,
        i => ((i - 1) / tot) as u32 * 10,
    }
}
