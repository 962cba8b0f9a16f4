//! Poured liquid
//!
//! A two-stop vertical gradient: the drink's opaque color at the top,
//! fading to the same color at alpha 0xaa over the cup background.

use crate::util::color::{Rgb, CUP_BACKGROUND};

/// Alpha of the bottom gradient stop
pub const BOTTOM_ALPHA: u8 = 0xaa;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PourGradient {
    pub top: Rgb,
    pub bottom: Rgb,
    /// Cup size in pixels
    pub width: u16,
    pub height: u16,
}

impl PourGradient {
    pub fn new(color: Rgb, width: u16, height: u16) -> Self {
        Self {
            top: color,
            bottom: color.over(CUP_BACKGROUND, BOTTOM_ALPHA),
            width,
            height,
        }
    }

    /// Color at pixel row `y` (0 is the top)
    pub fn color_at(&self, y: u16) -> Rgb {
        if self.height <= 1 {
            return self.top;
        }
        let t = f32::from(y.min(self.height - 1)) / f32::from(self.height - 1);
        self.top.lerp(self.bottom, t)
    }

    /// One color per row when drawn `rows` tall
    pub fn rows(&self, rows: u16) -> Vec<Rgb> {
        match rows {
            0 => Vec::new(),
            1 => vec![self.top],
            _ => (0..rows)
                .map(|r| {
                    let t = f32::from(r) / f32::from(rows - 1);
                    self.top.lerp(self.bottom, t)
                })
                .collect(),
        }
    }
}
