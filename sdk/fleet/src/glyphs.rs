//! # Glyph Table
//!
//! The glyph table is supplied by the build as one contiguous byte array:
//! characters, ship segments, board borders and animation frames, eight
//! scanlines per glyph. Drawing calls refer to glyphs by index.
//!
//! Some multi-cell pieces (the far board edge, the drawer caps) are stored
//! as row-major images that start at a glyph's address and run on into the
//! following glyphs; [`GlyphSet::run`] hands those out as a raw source.

use log::debug;

use crate::rop::Depth;

/// Indices of the non-text glyphs.
pub mod id {
    pub const INNER_EDGE_LEFT: u8 = 0x01;
    pub const FAR_EDGE_LEFT: u8 = 0x02;
    pub const FAR_EDGE_RIGHT: u8 = 0x03;
    pub const INNER_EDGE_RIGHT: u8 = 0x04;
    pub const ACTIVE_MARKER: u8 = 0x05;
    pub const DRAWER_CORNER_LEFT: u8 = 0x0C;
    pub const DRAWER_CORNER_RIGHT: u8 = 0x0D;
    pub const DRAWER_EDGE: u8 = 0x10;
    pub const DRAWER_CAP: u8 = 0x11;

    pub const SHIP_H_START: u8 = 0x12;
    pub const SHIP_H_MIDDLE: u8 = 0x13;
    pub const SHIP_H_END: u8 = 0x14;
    pub const SHIP_V_END: u8 = 0x15;
    pub const SHIP_V_MIDDLE: u8 = 0x16;
    pub const SHIP_V_START: u8 = 0x17;

    pub const CELL_BLANK: u8 = 0x18;
    pub const CELL_HIT: u8 = 0x19;
    pub const CELL_MISS: u8 = 0x1A;
    pub const CELL_HIT_BLINK: u8 = 0x1B;
    pub const LEGEND_PLACEHOLDER: u8 = 0x1C;
    pub const CLOCK: u8 = 0x1D;
    pub const CONNECTED_LEFT: u8 = 0x1E;
    pub const CONNECTED_RIGHT: u8 = 0x1F;
    pub const SPACE: u8 = 0x20;

    pub const OUTER_EDGE_RIGHT: u8 = 0x22;
    pub const OUTER_EDGE_LEFT: u8 = 0x23;
    pub const DRAWER_JOIN_LEFT: u8 = 0x24;
    pub const DRAWER_JOIN_RIGHT: u8 = 0x25;
    pub const FAR_EDGE: u8 = 0x29;

    pub const BOX_TOP_LEFT: u8 = 0x3B;
    pub const BOX_TOP_RIGHT: u8 = 0x3C;
    pub const BOX_BOTTOM_LEFT: u8 = 0x3D;
    pub const BOX_BOTTOM_RIGHT: u8 = 0x3E;

    pub const BADGE_TOP_LEFT: u8 = 0x5C;
    pub const BADGE_TOP_RIGHT: u8 = 0x5D;
    pub const BADGE_BOTTOM_LEFT: u8 = 0x5E;
    pub const BADGE_BOTTOM_RIGHT: u8 = 0x5F;
    pub const INACTIVE_MARKER: u8 = 0x62;
    pub const ATTACK_ANIM: u8 = 0x63;
}

/// The glyph table of the running program.
pub struct GlyphSet<'g> {
    data: &'g mut [u8],
    glyph_bytes: usize,
    normalized: bool,
}

impl<'g> GlyphSet<'g> {
    /// Wrap a glyph table laid out for `depth`.
    pub fn new(data: &'g mut [u8], depth: Depth) -> Self {
        Self {
            data,
            glyph_bytes: depth.glyph_bytes(),
            normalized: false,
        }
    }

    /// Number of whole glyphs in the table.
    pub fn len(&self) -> usize {
        self.data.len() / self.glyph_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn glyph_bytes(&self) -> usize {
        self.glyph_bytes
    }

    /// Bitmap of one glyph. Indices past the end of the table yield an
    /// empty slice, which draws nothing.
    pub fn glyph(&self, index: u8) -> &[u8] {
        let run = self.run(index);
        &run[..run.len().min(self.glyph_bytes)]
    }

    /// Raw source starting at glyph `index` and running to the end of the
    /// table.
    pub fn run(&self, index: u8) -> &[u8] {
        let start = index as usize * self.glyph_bytes;
        self.data.get(start..).unwrap_or(&[])
    }

    /// Swap the pixel nibbles of every byte so the leftmost pixel sits in the
    /// high nibble, as the GIME expects. Only the first call has an effect.
    pub fn normalize_byte_order(&mut self) {
        if self.normalized {
            return;
        }
        debug!("normalizing byte order of {} glyphs", self.len());
        for byte in self.data.iter_mut() {
            *byte = byte.rotate_left(4);
        }
        self.normalized = true;
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_are_indexed_by_depth() {
        let mut data = [0u8; 64];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        let glyphs = GlyphSet::new(&mut data, Depth::Four);
        assert_eq!(glyphs.len(), 8);
        assert_eq!(glyphs.glyph(2), &[16, 17, 18, 19, 20, 21, 22, 23]);
        assert_eq!(glyphs.run(7).len(), 8);
        assert!(glyphs.glyph(8).is_empty());
        assert!(glyphs.glyph(200).is_empty());
    }

    #[test]
    fn sixteen_colour_glyphs_are_four_bytes_wide() {
        let mut data = [0u8; 96];
        let glyphs = GlyphSet::new(&mut data, Depth::Sixteen);
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs.glyph(1).len(), 32);
    }

    #[test]
    fn normalization_happens_once() {
        let mut data = [0x12u8, 0xAB, 0, 0, 0, 0, 0, 0];
        let mut glyphs = GlyphSet::new(&mut data, Depth::Four);
        glyphs.normalize_byte_order();
        assert!(glyphs.is_normalized());
        glyphs.normalize_byte_order();
        assert_eq!(&glyphs.glyph(0)[..2], &[0x21, 0xBA]);
    }
}
