//! Per-pixel opacity masks.
//!
//! A [`Mask`] records which pixels of a sprite frame are opaque. Two entities
//! only collide when their rectangles overlap *and* at least one opaque pixel
//! of each lands on the same world pixel, so transparent padding around a
//! sprite never blocks movement.

/// Alpha values above this are treated as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Row-major opacity bitmap of a sprite frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// A fully transparent mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// A fully opaque mask, as produced by a sprite with no transparency.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from row-major alpha values.
    ///
    /// Missing trailing values are treated as transparent.
    pub fn from_alpha(width: u32, height: u32, alpha: impl IntoIterator<Item = u8>) -> Self {
        let mut mask = Self::empty(width, height);
        for (bit, a) in mask.bits.iter_mut().zip(alpha) {
            *bit = a > ALPHA_THRESHOLD;
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at (x, y). Out-of-range coordinates are transparent.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = opaque;
        }
    }

    /// Number of opaque pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Whether any opaque pixel of `other`, placed at (`offset_x`, `offset_y`)
    /// relative to this mask's top-left corner, coincides with an opaque
    /// pixel of this mask.
    pub fn overlaps(&self, other: &Mask, offset_x: i32, offset_y: i32) -> bool {
        let x0 = offset_x.max(0);
        let y0 = offset_y.max(0);
        let x1 = (offset_x + other.width as i32).min(self.width as i32);
        let y1 = (offset_y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset_x, y - offset_y) {
                    return true;
                }
            }
        }
        false
    }
}
