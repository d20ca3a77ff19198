use image::{GrayImage, Luma};

use crate::symbol::Symbol;

// Render
//------------------------------------------------------------------------------

const QUIET_ZONE: usize = 4;

impl Symbol {
    // Module under canvas cell (i, j) in module units, None inside the quiet zone
    fn module_at(&self, i: usize, j: usize) -> Option<bool> {
        let w = self.width();
        let inside = (QUIET_ZONE..QUIET_ZONE + w).contains(&i)
            && (QUIET_ZONE..QUIET_ZONE + w).contains(&j);
        inside.then(|| self.get(j - QUIET_ZONE, i - QUIET_ZONE))
    }

    /// Renders the symbol with a 4 module quiet zone, each module
    /// `module_sz` pixels wide.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let total_sz = (self.width() + 2 * QUIET_ZONE) as u32 * module_sz;
        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            let i = (y / module_sz) as usize;
            let j = (x / module_sz) as usize;
            match self.module_at(i, j) {
                Some(true) => Luma([0]),
                _ => Luma([255]),
            }
        })
    }

    /// Block character rendering for terminals. Light modules are full
    /// blocks so the code reads on a dark background.
    pub fn to_str(&self, module_sz: usize) -> String {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let total_sz = (self.width() + 2 * QUIET_ZONE) * module_sz;
        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                let dark = self.module_at(i / module_sz, j / module_sz).unwrap_or(false);
                canvas.push(if dark { ' ' } else { '█' });
            }
            canvas.push('\n');
        }

        canvas
    }
}
