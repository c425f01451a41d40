//! # Raster Operations
//!
//! Every byte the primitive layer writes is composited as
//!
//! ```text
//! out = (src & mask) | (!src & background)
//! ```
//!
//! where `mask` comes from the [`RasterOp`] and the active [`Depth`], and
//! `background` is the widened background pattern (zero unless a caller
//! paints text over a coloured band).
//!
//! Fill patterns are authored once, in the four-colour format of the base
//! hardware (four 2-bit pixels per byte), and widened on the fly for the
//! 16-colour mode.

/// Compositing rule applied to every byte written by a primitive call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RasterOp {
    /// Overwrite.
    Copy,
    /// Checkerboard blend; dims text that belongs to an inactive player.
    Alt,
    /// Dashed pattern used for separator lines.
    Line,
}

/// Four-colour fill patterns (one byte, four 2-bit pixels).
pub mod pattern {
    pub const CLEAR: u8 = 0;
    pub const YELLOW: u8 = 0b0101_0101;
    pub const BLUE: u8 = 0b1010_1010;
    pub const SOLID: u8 = 0xFF;
}

/// Pixel packing of the active graphics mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Depth {
    /// Four colours, 2 bits per pixel, one byte per cell row.
    Four,
    /// Sixteen colours, 4 bits per pixel, four bytes per cell row.
    Sixteen,
}

/// Palette index each 2-bit pixel widens to in 16-colour mode.
const WIDE_COLORS: [u8; 4] = [0x0, 0xE, 0x6, 0x3];

impl Depth {
    /// Bytes covering one 8-pixel-tall character cell, per scanline.
    #[inline(always)]
    pub const fn cell_bytes(self) -> usize {
        match self {
            Depth::Four => 1,
            Depth::Sixteen => 4,
        }
    }

    /// Bytes in one glyph of the glyph table.
    #[inline(always)]
    pub const fn glyph_bytes(self) -> usize {
        self.cell_bytes() * 8
    }

    /// The byte mask `rop` applies on scanline `y`.
    pub const fn mask(self, rop: RasterOp, y: u8) -> u8 {
        let odd = y & 1 == 1;
        match (self, rop) {
            (_, RasterOp::Copy) => 0xFF,
            (Depth::Four, RasterOp::Alt) => if odd { 0b0101_0101 } else { 0b1010_1010 },
            (Depth::Sixteen, RasterOp::Alt) => if odd { 0x22 } else { 0x88 },
            (Depth::Four, RasterOp::Line) => 0b1010_1010,
            (Depth::Sixteen, RasterOp::Line) => 0xCC,
        }
    }

    /// Expand a four-colour pattern byte into one cell row of this depth.
    ///
    /// Only the first [`cell_bytes`](Self::cell_bytes) entries are meaningful.
    pub const fn widen(self, pattern: u8) -> [u8; 4] {
        match self {
            Depth::Four => [pattern, 0, 0, 0],
            Depth::Sixteen => {
                let mut row = [0u8; 4];
                let mut i = 0;
                while i < 4 {
                    let pixel = (pattern >> (6 - 2 * i)) & 0b11;
                    row[i] = WIDE_COLORS[pixel as usize] * 0x11;
                    i += 1;
                }
                row
            }
        }
    }
}

/// Composite one source byte.
#[inline(always)]
pub const fn blend(src: u8, mask: u8, background: u8) -> u8 {
    (src & mask) | (!src & background)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_is_identity_on_empty_background() {
        for src in [0x00, 0x5A, 0xFF] {
            assert_eq!(blend(src, Depth::Four.mask(RasterOp::Copy, 3), 0), src);
        }
    }

    #[test]
    fn alt_alternates_per_scanline() {
        let even = Depth::Four.mask(RasterOp::Alt, 10);
        let odd = Depth::Four.mask(RasterOp::Alt, 11);
        assert_eq!(even, !odd);
        assert_eq!(Depth::Sixteen.mask(RasterOp::Alt, 0), 0x88);
        assert_eq!(Depth::Sixteen.mask(RasterOp::Alt, 1), 0x22);
    }

    #[test]
    fn background_shows_through_clear_source_bits() {
        assert_eq!(blend(0b1111_0000, 0xFF, pattern::YELLOW), 0b1111_0101);
    }

    #[test]
    fn widen_maps_each_pixel_to_two_nibbles() {
        assert_eq!(Depth::Sixteen.widen(pattern::BLUE), [0x66; 4]);
        assert_eq!(Depth::Sixteen.widen(pattern::YELLOW), [0xEE; 4]);
        assert_eq!(Depth::Sixteen.widen(0b0000_0010), [0x00, 0x00, 0x00, 0x66]);
        assert_eq!(Depth::Four.widen(0b0010_0110)[0], 0b0010_0110);
    }
}
